use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::errors;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Fallback for unmatched routes, so clients always get a JSON body.
pub async fn not_found() -> axum::response::Response {
    errors::not_found("route not found")
}
