//! Vault error types using thiserror 2.0.
//!
//! The collector relies on [`VaultError::NotADirectory`] being distinct from
//! every other failure: it is the only variant that changes control flow.

use rust_common::PlatformError;
use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Vault server unreachable or answered with a server error
    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    /// Login rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A store call was made before a successful login
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Listing a path that does not behave as a directory
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    /// Secret not found
    #[error("Secret not found at path: {0}")]
    SecretNotFound(String),

    /// Current version of the secret was permanently destroyed
    #[error("Secret version destroyed at path: {path} (version {version})")]
    SecretDestroyed {
        /// Secret path
        path: String,
        /// Destroyed version number
        version: u64,
    },

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Response body did not have the expected shape
    #[error("Invalid response for {path}: {reason}")]
    InvalidResponse {
        /// Request path
        path: String,
        /// What was wrong with the body
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Platform error
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if this is the listing-on-a-leaf condition.
    #[must_use]
    pub const fn is_not_a_directory(&self) -> bool {
        matches!(self, Self::NotADirectory(_))
    }

    /// Check if error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::RateLimited | Self::Http(_)
        )
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a not-a-directory error.
    #[must_use]
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Create a secret not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::SecretNotFound(path.into())
    }

    /// Create a destroyed version error.
    #[must_use]
    pub fn destroyed(path: impl Into<String>, version: u64) -> Self {
        Self::SecretDestroyed {
            path: path.into(),
            version,
        }
    }

    /// Create a permission denied error.
    #[must_use]
    pub fn denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied(path.into())
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::unavailable("connection refused");
        assert_eq!(err.to_string(), "Vault unavailable: connection refused");

        let err = VaultError::destroyed("app/db", 3);
        assert_eq!(
            err.to_string(),
            "Secret version destroyed at path: app/db (version 3)"
        );
    }

    #[test]
    fn test_not_a_directory_is_distinct() {
        assert!(VaultError::not_a_directory("app/db").is_not_a_directory());
        assert!(!VaultError::not_found("app/db").is_not_a_directory());
        assert!(!VaultError::denied("app/db").is_not_a_directory());
        assert!(!VaultError::destroyed("app/db", 1).is_not_a_directory());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(VaultError::Unavailable("timeout".to_string()).is_retryable());
        assert!(VaultError::RateLimited.is_retryable());
        assert!(!VaultError::SecretNotFound("path".to_string()).is_retryable());
        assert!(!VaultError::NotAuthenticated.is_retryable());
    }

    #[test]
    fn test_from_platform_error() {
        let platform_err = PlatformError::invalid_config("VAULT_KV_MOUNT", "empty");
        let vault_err: VaultError = platform_err.into();
        assert!(matches!(vault_err, VaultError::Platform(_)));
        assert_eq!(
            vault_err.to_string(),
            "Invalid configuration for VAULT_KV_MOUNT: empty"
        );
    }
}
