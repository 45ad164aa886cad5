//! Core types and dashboard engine for the `mranv` plugin
//!
//! The crate holds everything that does not depend on a web framework: the
//! simulated component telemetry, the view router, the dashboard shell with its
//! mount/unmount lifecycle, and the small host contract the plugin is written
//! against.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod host;
pub mod shell;
pub mod sources;
pub mod telemetry;
pub mod types;
pub mod views;

/// Identifier the application is registered under
pub const PLUGIN_ID: &str = "mranv";

/// Display title of the application
pub const PLUGIN_NAME: &str = "mranv";

/// Base path the host mounts the application at
pub const APP_BASE_PATH: &str = "/app/mranv";

// Re-export commonly used types
pub use config::{Config, DashboardConfig, LoggingConfig};
pub use error::{Error, Result};
pub use host::{AppMountParams, AppRegistration, AppUnmount, CoreSetup, CoreStart, MountTarget, Plugin};
pub use shell::{
    DashboardShell, DashboardState, RefreshOutcome, RefreshRequest, ShellView, StartServices,
    TimestampOutcome,
};
pub use sources::{ShowcaseSource, TimestampSource};
pub use types::{ComponentState, ComponentStatus, Showcase, ThreatLevel, TimestampResponse, ToastColor, ToastNotice};
pub use views::{Projection, ViewKey};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::configuration(format!("invalid log level '{}': {e}", config.level)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).try_init()
    };

    result.map_err(|e| Error::configuration(format!("failed to initialise logging: {e}")))
}
