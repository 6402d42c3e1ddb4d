use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted title suggestion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRequest {
    /// Unique identifier
    pub id: String,

    /// Blog post content as submitted
    pub content: String,

    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,

    /// Final merged title list (empty until the request completes, and
    /// stays empty when every provider failed)
    #[serde(default)]
    pub suggested_titles: Vec<String>,
}

impl TitleRequest {
    /// Create new request record with an empty title list
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            created_at: Utc::now(),
            suggested_titles: Vec::new(),
        }
    }
}

/// Suggest titles request body
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Blog post content
    pub content: String,

    /// Include keyword/summary analysis in the response
    #[serde(default)]
    pub include_analysis: bool,
}

/// Optional content analysis block
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBlock {
    /// Top keywords by frequency
    pub keywords: Vec<String>,

    /// Short content summary
    pub summary: String,

    /// Set when analysis failed and the block degraded to empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Suggest titles response
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// Persisted record id
    pub id: String,

    /// Merged title suggestions (at most 3)
    pub suggestions: Vec<String>,

    /// Analysis block, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisBlock>,

    /// Per-provider soft failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// User-facing error message
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,

    /// Chat provider constructed successfully
    pub chat_provider: bool,

    /// Summary provider constructed successfully
    pub summary_provider: bool,
}

/// Cache cleanup response
#[derive(Debug, Serialize)]
pub struct CacheCleanupResponse {
    /// Cleanup ran
    pub success: bool,

    /// Expired entries removed
    pub cleaned_entries: usize,
}
