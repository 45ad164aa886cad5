//! Page handlers

use super::ViewQuery;
use crate::pages::{dashboard, loading, not_mounted};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mranv_core::ShellView;
use std::sync::Arc;

/// Dashboard page
///
/// A `view` query parameter selects the active view before rendering.
pub async fn app_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let Some(shell) = state.shell() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(not_mounted::render_not_mounted()),
        )
            .into_response();
    };

    if let Some(view) = query.view.as_deref() {
        shell.select(view);
    }

    match shell.render() {
        ShellView::Loading => Html(loading::render_loading(state.loading_reload_ms)).into_response(),
        ShellView::Ready(view) => {
            Html(dashboard::render_dashboard(*view, state.page_reload_ms)).into_response()
        }
    }
}
