//! JSON views of the mounted dashboard

use super::{NotMounted, ViewQuery, mounted};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use mranv_core::{Projection, ToastNotice};
use std::sync::Arc;

/// Projection of a view
///
/// Without `?view=` the currently selected view is projected. The selection
/// itself is left unchanged.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Projection>, NotMounted> {
    let shell = mounted(&state)?;
    let projection = match query.view.as_deref() {
        Some(view) => shell.project(view),
        None => shell.project(shell.selected_view().as_str()),
    };
    Ok(Json(projection))
}

/// Current toast tray
pub async fn toasts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ToastNotice>>, NotMounted> {
    Ok(Json(mounted(&state)?.toasts()))
}
