//! Centralized error types for the workspace libraries.
//!
//! Errors raised while setting up shared infrastructure (HTTP client,
//! configuration, logging) before any store call is made.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP client could not be built or a request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration value is missing or malformed
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig {
        /// Name of the offending setting
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Tracing subscriber could not be installed
    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

impl PlatformError {
    /// Create an invalid configuration error for the given setting.
    #[must_use]
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by user-supplied configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
