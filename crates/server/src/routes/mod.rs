pub mod cache;
pub mod history;
pub mod suggest;
pub mod system;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use titlesmith_common::TitlesmithError;

use crate::types::ErrorResponse;

/// Map a pipeline error onto an HTTP error response
pub(crate) fn error_response(err: &TitlesmithError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}
