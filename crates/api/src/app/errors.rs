use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use brandhub_core::ValidationErrors;
use brandhub_infra::StoreError;

use crate::app::dto;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "brand store failure");
    match err {
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        StoreError::Query(msg) | StoreError::Decode(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

/// 422 with the per-field violation map under `errors`.
pub fn validation_error_response(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(dto::errors_envelope(&errors)),
    )
        .into_response()
}

/// Body could not be read as JSON (syntax error, wrong content type, ...).
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_json", rejection.body_text())
}

pub fn not_found(message: &'static str) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use brandhub_core::Violation;
    use http_body_util::BodyExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unavailable_store_maps_to_503() {
        let response = store_error_to_response(StoreError::Unavailable("pool closed".into()));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "store_unavailable");
    }

    #[tokio::test]
    async fn query_and_decode_failures_map_to_500() {
        for err in [
            StoreError::Query("syntax".into()),
            StoreError::Decode("bad column".into()),
        ] {
            let response = store_error_to_response(err);
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn validation_errors_are_wrapped_under_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("name", Violation::required("name"));

        let response = validation_error_response(errors);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[CONTENT_TYPE].to_str().unwrap(),
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["errors"]["name"][0]["keyword"], "required");
        assert_eq!(body["errors"]["name"][0]["params"]["missingProperty"], "name");
    }

    #[tokio::test]
    async fn not_found_has_json_body() {
        let response = not_found("brand not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "not_found", "message": "brand not found" }));
    }
}
