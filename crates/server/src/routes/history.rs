use actix_web::{get, web, HttpResponse};
use titlesmith_common::TitlesmithError;

use crate::routes::error_response;
use crate::state::AppState;

#[get("/history")]
pub async fn get_history(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    let records = state.store.read().await.all();
    HttpResponse::Ok().json(records)
}

#[get("/history/{id}")]
pub async fn get_history_record(
    path: web::Path<String>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    let id = path.into_inner();
    match state.store.read().await.get(&id) {
        Some(record) => HttpResponse::Ok().json(record),
        None => error_response(&TitlesmithError::not_found(format!("Request {}", id))),
    }
}
