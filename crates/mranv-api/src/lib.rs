//! Server-side half of the `mranv` plugin
//!
//! Defines the timestamp route and the server plugin that registers it on the
//! host router, plus the health and fallback routes the standalone server uses.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod handlers;
pub mod plugin;
pub mod routes;

pub use plugin::{HttpServiceSetup, MranvServerPlugin, ServerCoreSetup};

use axum::Router;
use mranv_core::Plugin;

/// Build the standalone API router
///
/// Runs the server plugin's setup against a fresh host router and adds the
/// health and fallback routes.
///
/// # Errors
///
/// Returns an error if the plugin fails to set up.
pub fn build_router() -> mranv_core::Result<Router> {
    let mut core = ServerCoreSetup::default();
    MranvServerPlugin::new().setup(&mut core)?;

    Ok(core
        .http
        .into_router()
        .merge(routes::health_routes())
        .fallback(routes::not_found_handler))
}
