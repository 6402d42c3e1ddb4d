use crate::error::TitlesmithError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Titlesmith application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data directory (request history lives here)
    pub data_dir: PathBuf,

    /// Chat provider API base URL (OpenAI-compatible)
    pub chat_base_url: String,

    /// Chat provider API key (required for the chat provider)
    pub chat_api_key: String,

    /// Chat model name
    pub chat_model: String,

    /// Summarization inference API base URL
    pub summary_base_url: String,

    /// Summarization API key (empty switches the summary provider to local mode)
    pub summary_api_key: String,

    /// Summarization model name
    pub summary_model: String,

    /// Local generation API base URL (Ollama-compatible, keyless fallback)
    pub local_base_url: String,

    /// Local model name
    pub local_model: String,

    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            chat_base_url: "https://api.openai.com/v1".to_string(),
            chat_api_key: String::new(),
            chat_model: "gpt-4-turbo-preview".to_string(),
            summary_base_url: "https://api-inference.huggingface.co".to_string(),
            summary_api_key: String::new(),
            summary_model: "facebook/bart-large-cnn".to_string(),
            local_base_url: "http://localhost:11434".to_string(),
            local_model: "llama3.2:latest".to_string(),
            cache_ttl_secs: 86_400,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./data/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, TitlesmithError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            data_dir: Self::get_env_path("DATA_DIR").unwrap_or(defaults.data_dir),
            chat_base_url: std::env::var("CHAT_BASE_URL")
                .unwrap_or(defaults.chat_base_url),
            chat_api_key: std::env::var("CHAT_API_KEY").unwrap_or_default(),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            summary_base_url: std::env::var("SUMMARY_BASE_URL")
                .unwrap_or(defaults.summary_base_url),
            summary_api_key: std::env::var("SUMMARY_API_KEY").unwrap_or_default(),
            summary_model: std::env::var("SUMMARY_MODEL")
                .unwrap_or(defaults.summary_model),
            local_base_url: std::env::var("LOCAL_BASE_URL")
                .unwrap_or(defaults.local_base_url),
            local_model: std::env::var("LOCAL_MODEL").unwrap_or(defaults.local_model),
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), TitlesmithError> {
        let dirs = vec![&self.data_dir, &self.log_dir];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    TitlesmithError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get path of the request history file
    pub fn request_store_path(&self) -> PathBuf {
        self.data_dir.join("title_requests.json")
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TitlesmithError> {
        for (name, url) in [
            ("Chat", &self.chat_base_url),
            ("Summary", &self.summary_base_url),
            ("Local", &self.local_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TitlesmithError::config(format!(
                    "{} base URL must start with http:// or https://",
                    name
                )));
            }
        }

        if self.chat_model.is_empty() {
            return Err(TitlesmithError::config("Chat model name cannot be empty"));
        }

        if self.summary_model.is_empty() {
            return Err(TitlesmithError::config(
                "Summary model name cannot be empty",
            ));
        }

        if self.cache_ttl_secs == 0 {
            return Err(TitlesmithError::config("Cache TTL cannot be 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(TitlesmithError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_ttl_secs, 86_400);
        assert_eq!(config.chat_model, "gpt-4-turbo-preview");
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.chat_base_url = "ftp://example.com".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.cache_ttl_secs = 0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_request_store_path() {
        let config = AppConfig::default();
        assert!(config
            .request_store_path()
            .ends_with("title_requests.json"));
    }
}
