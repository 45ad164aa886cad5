//! Application state shared by the HTTP handlers

use mranv_core::{DashboardConfig, DashboardShell, MountTarget};
use std::sync::Arc;

/// Application state holding the mount target the dashboard lives in
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the mounted dashboard is attached
    pub target: MountTarget,
    /// Reload delay of the loading page, the loading grace period
    pub loading_reload_ms: u64,
    /// Reload delay of the dashboard page, the telemetry tick cadence
    pub page_reload_ms: u64,
}

impl AppState {
    /// Create new application state
    pub const fn new(target: MountTarget, config: &DashboardConfig) -> Self {
        Self {
            target,
            loading_reload_ms: config.loading_grace_ms,
            page_reload_ms: config.tick_interval_ms,
        }
    }

    /// The live dashboard, if one is mounted
    pub fn shell(&self) -> Option<Arc<DashboardShell>> {
        self.target.current()
    }
}
