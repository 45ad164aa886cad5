//! Error types for the `mranv` plugin

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the `mranv` plugin
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Transport failure while calling an external collaborator
    #[error("Failed to fetch {resource}: {message}")]
    Fetch {
        /// What was being fetched
        resource: String,
        /// Error message
        message: String,
    },

    /// The collaborator answered, but not with something we understand
    #[error("Invalid response from {resource}: {message}")]
    InvalidResponse {
        /// What was being fetched
        resource: String,
        /// Error message
        message: String,
    },

    /// No application with this identifier is registered
    #[error("Application not registered: {app_id}")]
    NotRegistered {
        /// Application identifier
        app_id: String,
    },

    /// Registering the same application twice
    #[error("Application already registered: {app_id}")]
    AlreadyRegistered {
        /// Application identifier
        app_id: String,
    },

    /// The mount target already holds a live dashboard
    #[error("Mount target is already occupied")]
    MountTargetOccupied,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from talking to an external collaborator
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::InvalidResponse { .. })
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}
