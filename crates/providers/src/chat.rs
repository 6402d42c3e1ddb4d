use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use titlesmith_cache::SuggestionCache;
use titlesmith_common::{AppConfig, Result, TitlesmithError};
use tracing::{debug, error, info, warn};

use crate::parse::{parse_title_lines, truncate_content};
use crate::prompts::{title_prompt, TITLE_SYSTEM_PROMPT};
use crate::provider::TitleProvider;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Content character budget for the chat prompt
const MAX_CONTENT_CHARS: usize = 4000;

/// Remote call timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Title provider backed by an OpenAI-compatible chat completion endpoint
pub struct ChatTitleProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    cache: Arc<SuggestionCache>,
}

impl ChatTitleProvider {
    /// Create new chat title provider
    ///
    /// Fails when no API key is configured; the provider cannot operate
    /// without one.
    pub fn new(config: &AppConfig, cache: Arc<SuggestionCache>) -> Result<Self> {
        if config.chat_api_key.is_empty() {
            return Err(TitlesmithError::provider("Chat API key is not set"));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TitlesmithError::provider(format!("Failed to create HTTP client: {}", e)))?;

        info!("Chat title provider initialized: {}", config.chat_base_url);

        Ok(Self {
            client,
            base_url: config.chat_base_url.clone(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
            cache,
        })
    }

    /// Single chat completion call, returning the generated text
    async fn complete(&self, content: &str, num_suggestions: usize) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let prompt = title_prompt(&truncate_content(content, MAX_CONTENT_CHARS), num_suggestions);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: TITLE_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 150,
            top_p: 1.0,
            frequency_penalty: 0.5,
            presence_penalty: 0.3,
        };

        debug!(
            "Sending chat completion request - Model: {}, Prompt chars: {}",
            request.model,
            request.messages[1].content.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                TitlesmithError::provider(
                    "Connection error. Please check your internet connection.",
                )
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                error!("Chat endpoint rate limit exceeded");
                return Err(TitlesmithError::provider(
                    "Rate limit exceeded. Please try again later.",
                ));
            }
            status if status.is_server_error() => {
                error!("Chat endpoint server error: {}", status);
                return Err(TitlesmithError::provider(
                    "Chat service is currently experiencing issues.",
                ));
            }
            status => {
                error!("Chat endpoint error: {}", status);
                return Err(TitlesmithError::provider(
                    "API error occurred. Please try again.",
                ));
            }
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse chat completion response: {}", e);
            TitlesmithError::provider("API error occurred. Please try again.")
        })?;

        let text = result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        debug!("Received chat completion - Length: {}", text.len());
        Ok(text)
    }
}

#[async_trait]
impl TitleProvider for ChatTitleProvider {
    fn id(&self) -> &'static str {
        "chat"
    }

    fn display_name(&self) -> &'static str {
        "Chat provider"
    }

    async fn generate_titles(
        &self,
        content: &str,
        num_suggestions: usize,
    ) -> Result<Vec<String>> {
        // Check cache first
        if let Some(cached) = self.cache.get(content, self.id()) {
            info!("Using cached chat title suggestions");
            return Ok(cached);
        }

        let generated = self.complete(content, num_suggestions).await?;
        if generated.is_empty() {
            warn!("Empty response from chat endpoint");
            return Ok(Vec::new());
        }

        let titles = parse_title_lines(&generated);
        if titles.is_empty() {
            warn!("No titles generated from chat response");
            return Ok(Vec::new());
        }

        if self.cache.set(content, self.id(), &titles) {
            debug!("Cached {} chat title suggestions", titles.len());
        }

        info!("Generated {} title suggestions using chat provider", titles.len());
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> AppConfig {
        AppConfig {
            chat_api_key: key.to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_construction_requires_api_key() {
        let cache = Arc::new(SuggestionCache::new());
        assert!(ChatTitleProvider::new(&config_with_key(""), cache).is_err());
    }

    #[test]
    fn test_construction_with_api_key() {
        let cache = Arc::new(SuggestionCache::new());
        let provider = ChatTitleProvider::new(&config_with_key("sk-test"), cache).unwrap();
        assert_eq!(provider.id(), "chat");
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_remote_call() {
        let cache = Arc::new(SuggestionCache::new());
        let stored = vec!["Cached Title".to_string()];
        cache.set("some content", "chat", &stored);

        // Unroutable base URL: a cache miss would fail, a hit returns instantly
        let mut config = config_with_key("sk-test");
        config.chat_base_url = "http://127.0.0.1:1".to_string();

        let provider = ChatTitleProvider::new(&config, cache).unwrap();
        let titles = provider.generate_titles("some content", 3).await.unwrap();
        assert_eq!(titles, stored);
    }
}
