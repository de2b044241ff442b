use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};

use brandhub_brands::{BrandId, NewBrand};

use crate::app::routes::API_V1;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_brands).post(create_brand).fallback(method_not_allowed),
        )
        .route("/:id", get(get_brand).fallback(method_not_allowed))
}

pub async fn list_brands(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.brands().find_all().await {
        Ok(brands) => (StatusCode::OK, Json(dto::brands_envelope(&brands))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_brand(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // A malformed id can't name any stored brand.
    let id: BrandId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found("brand not found"),
    };

    match services.brands().find_one(id).await {
        Ok(Some(brand)) => (StatusCode::OK, Json(dto::brand_envelope(&brand))).into_response(),
        Ok(None) => errors::not_found("brand not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_brand(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(payload) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new_brand = match NewBrand::from_payload(&payload) {
        Ok(b) => b,
        Err(validation) => {
            tracing::debug!(errors = %validation, "brand rejected");
            return errors::validation_error_response(validation);
        }
    };

    let brand = match services.brands().insert(vec![new_brand]).await {
        Ok(mut created) => match created.pop() {
            Some(b) => b,
            None => {
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "store returned no brand for insert",
                );
            }
        },
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(brand_id = %brand.id, name = %brand.name, "brand created");

    (
        StatusCode::CREATED,
        [(LOCATION, format!("{API_V1}/brands/{}", brand.id))],
        Json(dto::brand_envelope(&brand)),
    )
        .into_response()
}

async fn method_not_allowed() -> axum::response::Response {
    errors::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "method_not_allowed",
        "method not allowed",
    )
}
