//! Route definitions

use crate::handlers;
use axum::{Router, http::StatusCode, routing::get};
use tower_http::compression::CompressionLayer;

/// Path of the timestamp endpoint
pub const EXAMPLE_PATH: &str = "/api/mranv/example";

/// Routes the server plugin defines on the host router
pub fn plugin_routes() -> Router {
    Router::new()
        .route(EXAMPLE_PATH, get(handlers::example::get_time))
        .layer(CompressionLayer::new())
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Handle 404 Not Found errors
pub async fn not_found_handler() -> (StatusCode, axum::Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}
