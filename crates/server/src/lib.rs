//! Titlesmith HTTP Server
//!
//! Actix-web REST API exposing the title suggestion pipeline

pub mod pipeline;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use titlesmith_common::{AppConfig, Result};
use tracing_actix_web::TracingLogger;

use crate::state::AppState;

/// Start the HTTP server with the given configuration
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config).await?);

    tracing::info!("Starting titlesmith server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .service(routes::suggest::suggest)
            .service(routes::history::get_history)
            .service(routes::history::get_history_record)
            .service(routes::cache::cache_stats)
            .service(routes::cache::cache_cleanup)
            .service(routes::system::health)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
