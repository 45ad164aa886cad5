//! Configuration management for the `mranv` plugin

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dashboard shell and telemetry configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Random GIF provider used by the manual refresh action
    #[serde(default)]
    pub giphy: GiphyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, if different from the bind address
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Timeout in seconds for calls the dashboard makes to this server's own routes
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Dashboard shell and telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Telemetry tick cadence in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// How long a toast stays in the tray, in milliseconds
    #[serde(default = "default_toast_lifetime_ms")]
    pub toast_lifetime_ms: u64,

    /// Loading indicator grace period after mount, in milliseconds
    #[serde(default = "default_loading_grace_ms")]
    pub loading_grace_ms: u64,

    /// Probability that a tick emits a component toast
    #[serde(default = "default_toast_probability")]
    pub toast_probability: f64,

    /// Fixed seed for the telemetry random source
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fetch a fresh showcase item as soon as the shell is mounted
    #[serde(default = "default_refresh_on_mount")]
    pub refresh_on_mount: bool,
}

/// Random GIF provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiphyConfig {
    /// API base URL
    #[serde(default = "default_giphy_base_url")]
    pub base_url: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Tag the random GIF is drawn from
    #[serde(default = "default_giphy_tag")]
    pub tag: String,

    /// Content rating
    #[serde(default = "default_giphy_rating")]
    pub rating: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5601
}

const fn default_tick_interval_ms() -> u64 {
    3000
}

const fn default_toast_lifetime_ms() -> u64 {
    3000
}

const fn default_loading_grace_ms() -> u64 {
    1000
}

const fn default_toast_probability() -> f64 {
    0.3
}

const fn default_refresh_on_mount() -> bool {
    true
}

fn default_giphy_base_url() -> String {
    "https://api.giphy.com".to_string()
}

fn default_giphy_tag() -> String {
    "dog".to_string()
}

fn default_giphy_rating() -> String {
    "g".to_string()
}

const fn default_request_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            toast_lifetime_ms: default_toast_lifetime_ms(),
            loading_grace_ms: default_loading_grace_ms(),
            toast_probability: default_toast_probability(),
            seed: None,
            refresh_on_mount: default_refresh_on_mount(),
        }
    }
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            base_url: default_giphy_base_url(),
            api_key: String::new(),
            tag: default_giphy_tag(),
            rating: default_giphy_rating(),
            timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Base URL other components use to reach this server
    ///
    /// An unspecified bind address is replaced by loopback.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.public_base_url {
            return url.trim_end_matches('/').to_string();
        }
        let host = match self.host.as_str() {
            "0.0.0.0" | "" => "127.0.0.1",
            "::" => "[::1]",
            other => other,
        };
        format!("http://{host}:{}", self.port)
    }

    /// Timeout for calls to this server's own routes
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DashboardConfig {
    /// Telemetry tick cadence
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Toast lifetime
    pub const fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_lifetime_ms)
    }

    /// Loading grace period
    pub const fn loading_grace(&self) -> Duration {
        Duration::from_millis(self.loading_grace_ms)
    }

    /// Check the values the shell relies on
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero tick interval or a toast
    /// probability outside `[0, 1]`.
    pub fn validate(&self) -> crate::Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(crate::Error::configuration(
                "dashboard.tick_interval_ms must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.toast_probability) {
            return Err(crate::Error::configuration(format!(
                "dashboard.toast_probability must be within [0, 1], got {}",
                self.toast_probability
            )));
        }
        Ok(())
    }
}

impl GiphyConfig {
    /// Request timeout
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from an optional file and the environment
    ///
    /// Without an explicit path, `mranv.toml` in the working directory is used
    /// when present. Environment variables use the `MRANV__` prefix with `__`
    /// between sections, e.g. `MRANV__SERVER__PORT=8080`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("mranv").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("MRANV")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.dashboard.validate()?;
        Ok(config)
    }
}
