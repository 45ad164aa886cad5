//! HTTP handlers for the dashboard pages, actions and JSON views

pub mod actions;
pub mod api;
pub mod pages;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mranv_core::DashboardShell;
use serde::Deserialize;
use std::sync::Arc;

/// `?view=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Navigation key
    pub view: Option<String>,
}

/// Rejection used when no dashboard is mounted
#[derive(Debug, Clone, Copy)]
pub struct NotMounted;

impl IntoResponse for NotMounted {
    fn into_response(self) -> Response {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(serde_json::json!({
                "error": "Service Unavailable",
                "code": "NOT_MOUNTED",
                "message": "The dashboard application is not mounted"
            })),
        )
            .into_response()
    }
}

fn mounted(state: &AppState) -> Result<Arc<DashboardShell>, NotMounted> {
    state.shell().ok_or(NotMounted)
}
