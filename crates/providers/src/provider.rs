use async_trait::async_trait;
use titlesmith_common::Result;

/// Common trait for title generation providers
#[async_trait]
pub trait TitleProvider: Send + Sync {
    /// Stable provider identifier, also used as the cache namespace
    fn id(&self) -> &'static str;

    /// Human-readable provider name for warnings and logs
    fn display_name(&self) -> &'static str;

    /// Generate title suggestions for blog-post content
    ///
    /// An empty list is a valid outcome; errors are reserved for transport
    /// and upstream faults.
    async fn generate_titles(&self, content: &str, num_suggestions: usize)
        -> Result<Vec<String>>;
}
