//! Form actions: refresh, get data, dismiss toast
//!
//! Each action runs against the mounted dashboard and redirects back to the
//! page with `303 See Other`. Outcomes surface as toasts on the next render.

use super::{NotMounted, mounted};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use mranv_core::{APP_BASE_PATH, RefreshRequest, TimestampOutcome};
use std::sync::Arc;
use tracing::debug;

/// Start fetching a new showcase item
///
/// Redirects as soon as the fetch is under way; the page shows the loading
/// state until it completes.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Redirect, NotMounted> {
    let shell = mounted(&state)?;
    match shell.spawn_refresh() {
        RefreshRequest::Started => debug!("Refresh started"),
        RefreshRequest::AlreadyPending => debug!("Refresh ignored, one is already pending"),
        RefreshRequest::Unmounted => return Err(NotMounted),
    }
    Ok(Redirect::to(APP_BASE_PATH))
}

/// Fetch the server time
pub async fn get_data(State(state): State<Arc<AppState>>) -> Result<Redirect, NotMounted> {
    let shell = mounted(&state)?;
    if let TimestampOutcome::Updated(time) = shell.fetch_timestamp().await {
        debug!(%time, "Timestamp stored");
    }
    Ok(Redirect::to(APP_BASE_PATH))
}

/// Dismiss a toast before it expires
pub async fn dismiss_toast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Redirect, NotMounted> {
    let shell = mounted(&state)?;
    if !shell.dismiss_toast(id) {
        debug!(id, "Toast already gone");
    }
    Ok(Redirect::to(APP_BASE_PATH))
}
