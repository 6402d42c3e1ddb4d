use std::sync::Arc;
use titlesmith_common::{Result, TitlesmithError};
use titlesmith_providers::TitleProvider;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::store::RequestStore;
use crate::types::{AnalysisBlock, SuggestResponse};

/// Minimum accepted content length in characters
pub const MIN_CONTENT_CHARS: usize = 50;

/// Total titles returned per request
pub const MERGE_QUOTA: usize = 3;

/// A provider as wired at startup
///
/// Construction failures are kept instead of aborting startup, so a broken
/// provider degrades to a per-request warning while the other one keeps
/// serving.
pub enum ProviderSlot {
    Ready(Arc<dyn TitleProvider>),
    Failed { name: &'static str, reason: String },
}

impl ProviderSlot {
    pub fn ready(provider: Arc<dyn TitleProvider>) -> Self {
        Self::Ready(provider)
    }

    pub fn failed(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed {
            name,
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Merge provider results under the fixed quota
///
/// Takes up to 2 titles from the primary provider and 1 from the secondary,
/// then fills remaining slots from the primary's third title and the
/// secondary's tail. Fill steps are no-ops when insufficient candidates
/// remain.
pub fn merge_titles(primary: &[String], secondary: &[String]) -> Vec<String> {
    let mut combined: Vec<String> = Vec::new();
    combined.extend(primary.iter().take(2).cloned());
    combined.extend(secondary.iter().take(1).cloned());

    if combined.len() < MERGE_QUOTA {
        if let Some(third) = primary.get(2) {
            combined.push(third.clone());
        }
    }

    if combined.len() < MERGE_QUOTA {
        for title in secondary.iter().skip(1) {
            if combined.len() >= MERGE_QUOTA {
                break;
            }
            combined.push(title.clone());
        }
    }

    combined.truncate(MERGE_QUOTA);
    combined
}

/// Title suggestion pipeline: validate, persist, analyze, generate, merge
pub struct TitlePipeline {
    chat: ProviderSlot,
    summary: ProviderSlot,
    store: Arc<RwLock<RequestStore>>,
}

impl TitlePipeline {
    /// Create new pipeline with injected provider slots
    pub fn new(chat: ProviderSlot, summary: ProviderSlot, store: Arc<RwLock<RequestStore>>) -> Self {
        Self {
            chat,
            summary,
            store,
        }
    }

    pub fn chat_ready(&self) -> bool {
        self.chat.is_ready()
    }

    pub fn summary_ready(&self) -> bool {
        self.summary.is_ready()
    }

    /// Run the full suggestion pass for one request
    pub async fn suggest(&self, content: &str, include_analysis: bool) -> Result<SuggestResponse> {
        // 1. Validate before touching the store
        if content.trim().is_empty() {
            return Err(TitlesmithError::invalid_input(
                "Blog post content is required",
            ));
        }
        if content.chars().count() < MIN_CONTENT_CHARS {
            return Err(TitlesmithError::invalid_input(format!(
                "Blog post content must be at least {} characters long",
                MIN_CONTENT_CHARS
            )));
        }

        // 2. Create the record first so even total provider failure leaves
        //    an auditable row
        let record = self.store.write().await.create(content).map_err(|e| {
            error!("Failed to create request entry: {}", e);
            TitlesmithError::store("Failed to process request")
        })?;

        // 3. Optional analysis, never fatal
        let analysis = if include_analysis {
            Some(build_analysis(content))
        } else {
            None
        };

        // 4. Providers run independently; order is fixed for the merge
        let mut warnings = Vec::new();
        let chat_titles = run_slot(&self.chat, content, &mut warnings).await;
        let summary_titles = run_slot(&self.summary, content, &mut warnings).await;

        // 5. Merge under the quota
        let combined = merge_titles(&chat_titles, &summary_titles);

        if combined.is_empty() {
            if warnings.is_empty() {
                return Err(TitlesmithError::internal("No titles could be generated"));
            }
            return Err(TitlesmithError::provider(format!(
                "Failed to generate titles: {}",
                warnings.join(" | ")
            )));
        }

        // 6. Persist the result; the response still carries the titles if
        //    this fails
        if let Err(e) = self.store.write().await.update_titles(&record.id, &combined) {
            error!("Failed to save suggestions: {}", e);
        }

        info!(
            "Generated {} title suggestions for request {}",
            combined.len(),
            record.id
        );

        // 7. Respond
        Ok(SuggestResponse {
            id: record.id,
            suggestions: combined,
            analysis,
            warnings: if warnings.is_empty() {
                None
            } else {
                Some(warnings)
            },
        })
    }
}

/// Call one provider slot, converting any failure into a warning
async fn run_slot(slot: &ProviderSlot, content: &str, warnings: &mut Vec<String>) -> Vec<String> {
    match slot {
        ProviderSlot::Ready(provider) => {
            match provider.generate_titles(content, MERGE_QUOTA).await {
                Ok(titles) => titles,
                Err(e) => {
                    error!("{} error: {}", provider.display_name(), e);
                    warnings.push(format!("{}: {}", provider.display_name(), e));
                    Vec::new()
                }
            }
        }
        ProviderSlot::Failed { name, reason } => {
            warn!("{} unavailable: {}", name, reason);
            warnings.push(format!("{}: {}", name, reason));
            Vec::new()
        }
    }
}

/// Run keyword and summary extraction, degrading to an empty block on error
fn build_analysis(content: &str) -> AnalysisBlock {
    let keywords = titlesmith_analyzer::extract_keywords(content, 5);
    let summary = titlesmith_analyzer::get_content_summary(content, 200);

    match (keywords, summary) {
        (Ok(keywords), Ok(summary)) => AnalysisBlock {
            keywords: keywords.into_iter().map(|(word, _)| word).collect(),
            summary,
            error: None,
        },
        (keywords, summary) => {
            if let Err(e) = &keywords {
                error!("Content analysis failed: {}", e);
            }
            if let Err(e) = &summary {
                error!("Content analysis failed: {}", e);
            }
            AnalysisBlock {
                keywords: Vec::new(),
                summary: String::new(),
                error: Some("Content analysis failed".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_two_plus_one() {
        let merged = merge_titles(&titles(&["a1", "a2", "a3"]), &titles(&["b1"]));
        assert_eq!(merged, titles(&["a1", "a2", "b1"]));
    }

    #[test]
    fn test_merge_fills_from_primary_third() {
        let merged = merge_titles(&titles(&["a1", "a2", "a3"]), &[]);
        assert_eq!(merged, titles(&["a1", "a2", "a3"]));
    }

    #[test]
    fn test_merge_fills_from_secondary_tail() {
        let merged = merge_titles(&titles(&["a1"]), &titles(&["b1", "b2", "b3"]));
        assert_eq!(merged, titles(&["a1", "b1", "b2"]));
    }

    #[test]
    fn test_merge_short_candidates_are_not_an_error() {
        let merged = merge_titles(&titles(&["a1", "a2"]), &titles(&["b1"]));
        assert_eq!(merged, titles(&["a1", "a2", "b1"]));

        let merged = merge_titles(&titles(&["a1"]), &titles(&["b1"]));
        assert_eq!(merged, titles(&["a1", "b1"]));
    }

    #[test]
    fn test_merge_never_exceeds_quota() {
        let merged = merge_titles(
            &titles(&["a1", "a2", "a3", "a4"]),
            &titles(&["b1", "b2", "b3"]),
        );
        assert_eq!(merged.len(), MERGE_QUOTA);
    }

    #[test]
    fn test_merge_both_empty() {
        assert!(merge_titles(&[], &[]).is_empty());
    }

    struct StaticProvider {
        name: &'static str,
        titles: Vec<String>,
    }

    #[async_trait]
    impl titlesmith_providers::TitleProvider for StaticProvider {
        fn id(&self) -> &'static str {
            self.name
        }

        fn display_name(&self) -> &'static str {
            self.name
        }

        async fn generate_titles(
            &self,
            _content: &str,
            _num_suggestions: usize,
        ) -> titlesmith_common::Result<Vec<String>> {
            Ok(self.titles.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl titlesmith_providers::TitleProvider for FailingProvider {
        fn id(&self) -> &'static str {
            "failing"
        }

        fn display_name(&self) -> &'static str {
            "Failing provider"
        }

        async fn generate_titles(
            &self,
            _content: &str,
            _num_suggestions: usize,
        ) -> titlesmith_common::Result<Vec<String>> {
            Err(TitlesmithError::provider("upstream unavailable"))
        }
    }

    const VALID_CONTENT: &str =
        "This is a valid blog post about Rust that easily clears the length gate.";

    fn temp_store() -> (Arc<RwLock<RequestStore>>, PathBuf) {
        let path =
            std::env::temp_dir().join(format!("titlesmith-pipeline-{}.json", uuid::Uuid::new_v4()));
        let store = RequestStore::load(&path).unwrap();
        (Arc::new(RwLock::new(store)), path)
    }

    fn static_slot(name: &'static str, items: &[&str]) -> ProviderSlot {
        ProviderSlot::ready(Arc::new(StaticProvider {
            name,
            titles: titles(items),
        }))
    }

    #[tokio::test]
    async fn test_short_content_rejected_without_record() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            static_slot("chat", &["a1"]),
            static_slot("summary", &["b1"]),
            store.clone(),
        );

        let err = pipeline.suggest("too short", false).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(store.read().await.all().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_successful_merge_and_persist() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            static_slot("chat", &["a1", "a2", "a3"]),
            static_slot("summary", &["b1"]),
            store.clone(),
        );

        let response = pipeline.suggest(VALID_CONTENT, false).await.unwrap();
        assert_eq!(response.suggestions, titles(&["a1", "a2", "b1"]));
        assert!(response.warnings.is_none());

        let guard = store.read().await;
        let record = guard.get(&response.id).unwrap();
        assert_eq!(record.suggested_titles, titles(&["a1", "a2", "b1"]));

        drop(guard);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_one_provider_failing_degrades_to_warning() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            ProviderSlot::ready(Arc::new(FailingProvider)),
            static_slot("summary", &["b1", "b2"]),
            store.clone(),
        );

        let response = pipeline.suggest(VALID_CONTENT, false).await.unwrap();
        assert_eq!(response.suggestions, titles(&["b1", "b2"]));
        let warnings = response.warnings.unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failing provider:"));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_failed_slot_reported_as_warning() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            ProviderSlot::failed("Chat provider", "Chat API key is not set"),
            static_slot("summary", &["b1"]),
            store.clone(),
        );

        let response = pipeline.suggest(VALID_CONTENT, false).await.unwrap();
        assert_eq!(response.suggestions, titles(&["b1"]));
        assert!(response.warnings.unwrap()[0].contains("Chat API key is not set"));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_total_failure_leaves_record_with_empty_titles() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            ProviderSlot::ready(Arc::new(FailingProvider)),
            ProviderSlot::failed("Summary provider", "Failed to load local model"),
            store.clone(),
        );

        let err = pipeline.suggest(VALID_CONTENT, false).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        let message = err.to_string();
        assert!(message.contains("Failing provider"));
        assert!(message.contains("Summary provider"));

        // The record created up front persists with an empty title list
        let guard = store.read().await;
        let records = guard.all();
        assert_eq!(records.len(), 1);
        assert!(records[0].suggested_titles.is_empty());

        drop(guard);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_empty_results_without_warnings() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            static_slot("chat", &[]),
            static_slot("summary", &[]),
            store.clone(),
        );

        let err = pipeline.suggest(VALID_CONTENT, false).await.unwrap_err();
        assert!(err.to_string().contains("No titles could be generated"));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_analysis_block_included_on_request() {
        let (store, path) = temp_store();
        let pipeline = TitlePipeline::new(
            static_slot("chat", &["a1"]),
            static_slot("summary", &["b1"]),
            store.clone(),
        );

        let response = pipeline.suggest(VALID_CONTENT, true).await.unwrap();
        let analysis = response.analysis.unwrap();
        assert!(analysis.error.is_none());
        assert!(!analysis.keywords.is_empty());
        assert!(!analysis.summary.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
