use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::state::AppState;
use crate::types::CacheCleanupResponse;

/// Get suggestion cache statistics
#[get("/cache/stats")]
pub async fn cache_stats(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.cache.stats())
}

/// Sweep expired cache entries
#[post("/cache/cleanup")]
pub async fn cache_cleanup(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    info!("Cleaning up expired cache entries");
    let cleaned_entries = state.cache.cleanup();

    HttpResponse::Ok().json(CacheCleanupResponse {
        success: true,
        cleaned_entries,
    })
}
