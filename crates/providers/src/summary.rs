use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use titlesmith_cache::SuggestionCache;
use titlesmith_common::{AppConfig, Result, TitlesmithError};
use tracing::{debug, error, info, warn};

use crate::parse::{clean_title, truncate_content};
use crate::prompts::summary_prompt;
use crate::provider::TitleProvider;
use crate::types::{GenerateOptions, GenerateRequest, GenerateResponse, SummaryParameters, SummaryRequest};

/// Content character budget for summarization input
const MAX_CONTENT_CHARS: usize = 1000;

/// Remote call timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

enum SummaryBackend {
    /// Hosted inference API, bearer-token authenticated
    Remote {
        base_url: String,
        api_key: String,
        model: String,
    },
    /// Keyless local generation endpoint (Ollama-compatible)
    Local { base_url: String, model: String },
}

/// Title provider backed by a summarization model
///
/// Runs against the hosted inference API when an API key is configured,
/// otherwise falls back to a local model endpoint. The local fallback is
/// probed at construction time and construction fails when it is
/// unreachable.
pub struct SummaryTitleProvider {
    client: Client,
    backend: SummaryBackend,
    cache: Arc<SuggestionCache>,
}

impl SummaryTitleProvider {
    /// Create new summary title provider
    pub async fn new(config: &AppConfig, cache: Arc<SuggestionCache>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TitlesmithError::provider(format!("Failed to create HTTP client: {}", e)))?;

        let backend = if !config.summary_api_key.is_empty() {
            info!(
                "Summary title provider initialized in remote mode: {}",
                config.summary_base_url
            );
            SummaryBackend::Remote {
                base_url: config.summary_base_url.clone(),
                api_key: config.summary_api_key.clone(),
                model: config.summary_model.clone(),
            }
        } else {
            warn!("Summary API key not set. Falling back to local model.");
            Self::probe_local(&client, &config.local_base_url).await?;
            info!(
                "Summary title provider initialized in local mode: {} ({})",
                config.local_base_url, config.local_model
            );
            SummaryBackend::Local {
                base_url: config.local_base_url.clone(),
                model: config.local_model.clone(),
            }
        };

        Ok(Self {
            client,
            backend,
            cache,
        })
    }

    /// Verify the local model endpoint is reachable
    async fn probe_local(client: &Client, base_url: &str) -> Result<()> {
        let url = format!("{}/api/tags", base_url);
        let response = client.get(&url).send().await.map_err(|e| {
            error!("Failed to reach local model endpoint: {}", e);
            TitlesmithError::provider("Failed to load local model")
        })?;

        if !response.status().is_success() {
            error!("Local model endpoint returned {}", response.status());
            return Err(TitlesmithError::provider("Failed to load local model"));
        }

        Ok(())
    }

    /// Generate raw summaries via the hosted inference API
    async fn generate_remote(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        content: &str,
        num_suggestions: usize,
    ) -> Result<Vec<String>> {
        let url = format!("{}/models/{}", base_url, model);

        let request = SummaryRequest {
            inputs: truncate_content(content, MAX_CONTENT_CHARS),
            parameters: SummaryParameters {
                max_length: 30,
                min_length: 5,
                do_sample: true,
                top_k: 50,
                top_p: 0.95,
                num_return_sequences: num_suggestions as u32,
            },
        };

        debug!("Sending summarization request - Model: {}", model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Summarization API request timed out");
                    TitlesmithError::provider("Request timed out. Please try again.")
                } else {
                    error!("Summarization API request failed: {}", e);
                    TitlesmithError::provider("API request failed. Please try again.")
                }
            })?;

        if !response.status().is_success() {
            error!("Summarization API error: {}", response.status());
            return Err(TitlesmithError::provider(
                "API request failed. Please try again.",
            ));
        }

        let result: Value = response.json().await.map_err(|e| {
            error!("Failed to parse summarization response: {}", e);
            TitlesmithError::provider("API request failed. Please try again.")
        })?;

        Ok(extract_summary_texts(&result))
    }

    /// Generate raw summaries by sampling the local model N times
    async fn generate_local(
        &self,
        base_url: &str,
        model: &str,
        content: &str,
        num_suggestions: usize,
    ) -> Result<Vec<String>> {
        let url = format!("{}/api/generate", base_url);
        let prompt = summary_prompt(&truncate_content(content, MAX_CONTENT_CHARS));

        let mut summaries = Vec::new();
        for i in 0..num_suggestions {
            debug!("Sampling local summary {}/{}", i + 1, num_suggestions);

            let request = GenerateRequest {
                model: model.to_string(),
                prompt: prompt.clone(),
                stream: Some(false),
                options: Some(GenerateOptions {
                    temperature: None,
                    top_k: Some(50),
                    top_p: Some(0.95),
                    num_predict: Some(30),
                }),
            };

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    error!("Local generation request failed: {}", e);
                    TitlesmithError::provider("Failed to generate titles locally")
                })?
                .error_for_status()
                .map_err(|e| {
                    error!("Local generation API error: {}", e);
                    TitlesmithError::provider("Failed to generate titles locally")
                })?;

            let result: GenerateResponse = response.json().await.map_err(|e| {
                error!("Failed to parse local generation response: {}", e);
                TitlesmithError::provider("Failed to generate titles locally")
            })?;

            summaries.push(result.response.trim().to_string());
        }

        Ok(summaries)
    }
}

/// Pull summary texts out of the inference API response
///
/// The endpoint returns either a list of objects, a single object, or bare
/// strings depending on the model pipeline.
fn extract_summary_texts(value: &Value) -> Vec<String> {
    fn from_item(item: &Value) -> Option<String> {
        if let Some(text) = item.get("summary_text").and_then(Value::as_str) {
            return Some(text.trim().to_string());
        }
        if let Some(text) = item.get("generated_text").and_then(Value::as_str) {
            return Some(text.trim().to_string());
        }
        item.as_str().map(|s| s.trim().to_string())
    }

    match value {
        Value::Array(items) => items.iter().filter_map(from_item).collect(),
        other => from_item(other).into_iter().collect(),
    }
}

#[async_trait]
impl TitleProvider for SummaryTitleProvider {
    fn id(&self) -> &'static str {
        "summary"
    }

    fn display_name(&self) -> &'static str {
        "Summary provider"
    }

    async fn generate_titles(
        &self,
        content: &str,
        num_suggestions: usize,
    ) -> Result<Vec<String>> {
        // Check cache first
        if let Some(cached) = self.cache.get(content, self.id()) {
            info!("Using cached summary title suggestions");
            return Ok(cached);
        }

        let raw = match &self.backend {
            SummaryBackend::Remote {
                base_url,
                api_key,
                model,
            } => {
                self.generate_remote(base_url, api_key, model, content, num_suggestions)
                    .await?
            }
            SummaryBackend::Local { base_url, model } => {
                self.generate_local(base_url, model, content, num_suggestions)
                    .await?
            }
        };

        let titles: Vec<String> = raw
            .iter()
            .map(|t| clean_title(t))
            .filter(|t| !t.is_empty())
            .collect();

        if titles.is_empty() {
            warn!("No titles generated from summaries");
            return Ok(Vec::new());
        }

        if self.cache.set(content, self.id(), &titles) {
            debug!("Cached {} summary title suggestions", titles.len());
        }

        info!(
            "Generated {} title suggestions using summary provider",
            titles.len()
        );
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_summary_texts_from_list() {
        let value = json!([
            {"summary_text": " rust beats the odds "},
            {"generated_text": "another take"},
            "bare string"
        ]);
        assert_eq!(
            extract_summary_texts(&value),
            vec!["rust beats the odds", "another take", "bare string"]
        );
    }

    #[test]
    fn test_extract_summary_texts_from_single_object() {
        let value = json!({"generated_text": "only one"});
        assert_eq!(extract_summary_texts(&value), vec!["only one"]);
    }

    #[test]
    fn test_extract_summary_texts_ignores_unknown_shapes() {
        let value = json!([{"score": 0.5}, 42]);
        assert!(extract_summary_texts(&value).is_empty());
    }

    #[tokio::test]
    async fn test_construction_fails_without_local_endpoint() {
        let cache = Arc::new(SuggestionCache::new());
        let config = AppConfig {
            summary_api_key: String::new(),
            local_base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };
        assert!(SummaryTitleProvider::new(&config, cache).await.is_err());
    }

    #[tokio::test]
    async fn test_remote_mode_skips_local_probe() {
        let cache = Arc::new(SuggestionCache::new());
        let config = AppConfig {
            summary_api_key: "hf-test".to_string(),
            local_base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };
        let provider = SummaryTitleProvider::new(&config, cache).await.unwrap();
        assert_eq!(provider.id(), "summary");
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_remote_call() {
        let cache = Arc::new(SuggestionCache::new());
        let stored = vec!["Cached Summary Title".to_string()];
        cache.set("some content", "summary", &stored);

        let config = AppConfig {
            summary_api_key: "hf-test".to_string(),
            summary_base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };

        let provider = SummaryTitleProvider::new(&config, cache).await.unwrap();
        let titles = provider.generate_titles("some content", 3).await.unwrap();
        assert_eq!(titles, stored);
    }
}
