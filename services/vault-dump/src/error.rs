//! Process-level errors and their exit codes.

use rust_common::PlatformError;
use thiserror::Error;
use vault_kv_client::VaultError;

/// Usage line printed for a wrong argument count.
pub const USAGE: &str =
    "Usage: vault-dump <vault-address> <vault-username> <vault-password> <path-to-read>";

/// Message printed when login does not succeed.
pub const AUTH_FAILED: &str = "Authentication failed.";

/// Errors that end the process.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Wrong number or shape of arguments
    #[error("{usage}", usage = USAGE)]
    Usage(String),

    /// Environment configuration is malformed
    #[error("Configuration error: {0}")]
    Config(#[from] PlatformError),

    /// Login rejected, or the store could not be reached for login
    #[error("{message}", message = AUTH_FAILED)]
    Auth(#[source] VaultError),

    /// Listing or reading failed during traversal
    #[error("Secret collection failed: {0}")]
    Store(#[source] VaultError),

    /// Result could not be serialized or written
    #[error("Output failed: {0}")]
    Output(String),
}

impl DumpError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Config(_) | Self::Auth(_) => 1,
            Self::Store(_) | Self::Output(_) => 2,
        }
    }

    /// Whether the user-facing message belongs on stdout.
    #[must_use]
    pub const fn reports_to_stdout(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::Auth(_))
    }
}

impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DumpError::Usage("missing".to_string()).exit_code(), 1);
        assert_eq!(DumpError::Auth(VaultError::auth_failed("bad")).exit_code(), 1);
        assert_eq!(
            DumpError::Config(PlatformError::invalid_config("LOG_JSON", "bad")).exit_code(),
            1
        );
        assert_eq!(
            DumpError::Store(VaultError::destroyed("app/db", 1)).exit_code(),
            2
        );
        assert_eq!(DumpError::Output("closed".to_string()).exit_code(), 2);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(DumpError::Usage("x".to_string()).to_string(), USAGE);
        assert_eq!(
            DumpError::Auth(VaultError::unavailable("refused")).to_string(),
            AUTH_FAILED
        );
        assert_eq!(
            DumpError::Store(VaultError::denied("app")).to_string(),
            "Secret collection failed: Permission denied: app"
        );
    }

    #[test]
    fn test_stdout_reporting() {
        assert!(DumpError::Usage(String::new()).reports_to_stdout());
        assert!(DumpError::Auth(VaultError::NotAuthenticated).reports_to_stdout());
        assert!(!DumpError::Store(VaultError::RateLimited).reports_to_stdout());
    }
}
