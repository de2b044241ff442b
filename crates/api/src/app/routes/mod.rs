use axum::Router;

pub mod brands;
pub mod system;

/// Version prefix for every resource route.
pub const API_V1: &str = "/api/v1";

/// Router for all versioned resource endpoints.
pub fn router() -> Router {
    Router::new().nest(&format!("{API_V1}/brands"), brands::router())
}
