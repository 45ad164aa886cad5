//! Public-side half of the `mranv` plugin
//!
//! Holds the public plugin and its mount callback, the server-rendered
//! dashboard pages, the HTTP clients behind the two user actions and a small
//! host that wires everything into one axum router.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod components;
pub mod handlers;
pub mod pages;
pub mod plugin;
pub mod routes;
pub mod server;
pub mod state;

pub use plugin::{MranvPlugin, MranvPluginSetup, MranvPluginStart, PluginInitializerContext};
pub use server::{RunningApp, default_services, start};
pub use state::AppState;
