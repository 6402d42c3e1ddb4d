use actix_web::{post, web, HttpResponse};

use crate::routes::error_response;
use crate::state::AppState;
use crate::types::SuggestRequest;

#[post("/suggest")]
pub async fn suggest(
    req: web::Json<SuggestRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    match state
        .pipeline
        .suggest(&req.content, req.include_analysis)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::sync::Arc;
    use titlesmith_common::AppConfig;

    async fn test_state() -> Arc<AppState> {
        // Default config has no chat key and an unreachable local endpoint,
        // so both providers land in failed slots; that is enough to exercise
        // validation and error mapping through the handler.
        let config = AppConfig {
            data_dir: std::env::temp_dir().join(format!("titlesmith-{}", uuid::Uuid::new_v4())),
            local_base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };
        config.ensure_directories().unwrap();
        Arc::new(AppState::new(config).await.unwrap())
    }

    #[actix_web::test]
    async fn test_suggest_rejects_short_content() {
        let state = test_state().await;
        let app =
            test::init_service(App::new().app_data(web::Data::new(state)).service(suggest)).await;

        let req = test::TestRequest::post()
            .uri("/suggest")
            .set_json(serde_json::json!({"content": "too short"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_suggest_total_provider_failure_is_server_error() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(suggest),
        )
        .await;

        let content = "a".repeat(60);
        let req = test::TestRequest::post()
            .uri("/suggest")
            .set_json(serde_json::json!({ "content": content }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        // The record was still created before the providers ran
        assert_eq!(state.store.read().await.all().len(), 1);
    }
}
