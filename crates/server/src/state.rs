use std::sync::Arc;
use std::time::Duration;
use titlesmith_cache::SuggestionCache;
use titlesmith_common::{AppConfig, Result};
use titlesmith_providers::{ChatTitleProvider, SummaryTitleProvider};
use tokio::sync::RwLock;
use tracing::error;

use crate::pipeline::{ProviderSlot, TitlePipeline};
use crate::store::RequestStore;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Suggestion cache, shared with the providers
    pub cache: Arc<SuggestionCache>,

    /// Request history store
    pub store: Arc<RwLock<RequestStore>>,

    /// Title suggestion pipeline
    pub pipeline: TitlePipeline,
}

impl AppState {
    /// Create new application state
    ///
    /// Providers are constructed once here and injected into the pipeline;
    /// a provider that fails to construct is kept as a failed slot rather
    /// than aborting startup.
    pub async fn new(config: AppConfig) -> Result<Self> {
        let cache = Arc::new(SuggestionCache::with_ttl(Duration::from_secs(
            config.cache_ttl_secs,
        )));

        let store = RequestStore::load(&config.request_store_path())?;
        let store = Arc::new(RwLock::new(store));

        let chat = match ChatTitleProvider::new(&config, cache.clone()) {
            Ok(provider) => ProviderSlot::ready(Arc::new(provider)),
            Err(e) => {
                error!("Chat provider unavailable: {}", e);
                ProviderSlot::failed("Chat provider", e.to_string())
            }
        };

        let summary = match SummaryTitleProvider::new(&config, cache.clone()).await {
            Ok(provider) => ProviderSlot::ready(Arc::new(provider)),
            Err(e) => {
                error!("Summary provider unavailable: {}", e);
                ProviderSlot::failed("Summary provider", e.to_string())
            }
        };

        let pipeline = TitlePipeline::new(chat, summary, store.clone());

        Ok(Self {
            config,
            cache,
            store,
            pipeline,
        })
    }
}
