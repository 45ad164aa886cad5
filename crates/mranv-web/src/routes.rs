//! Route definitions for the dashboard application

use crate::{
    handlers::{actions, api, pages},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the dashboard application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Page
        .route("/app/mranv", get(pages::app_page))
        // Form actions
        .route("/app/mranv/refresh", post(actions::refresh))
        .route("/app/mranv/get-data", post(actions::get_data))
        .route("/app/mranv/toasts/:id/dismiss", post(actions::dismiss_toast))
        // JSON views
        .route("/api/mranv/dashboard", get(api::dashboard))
        .route("/api/mranv/dashboard/toasts", get(api::toasts))
        .layer(CompressionLayer::new())
}
