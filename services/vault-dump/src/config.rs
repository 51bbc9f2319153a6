//! Runtime settings from the environment.
//!
//! Arguments say what to dump; these settings only tune how. A `.env`
//! file in the working directory is honored.

use crate::error::DumpError;
use rust_common::{PlatformError, TracingConfig, parse_bool_env, parse_env};
use vault_kv_client::{VaultConfig, VaultError};

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Load settings from `LOG_LEVEL` and `LOG_JSON`.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Config`] if `LOG_JSON` is not a boolean.
    pub fn from_env() -> Result<Self, DumpError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            log_level: parse_env("LOG_LEVEL", defaults.log_level)?,
            log_json: parse_bool_env("LOG_JSON", defaults.log_json)?,
        })
    }

    /// Tracing configuration for these settings.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig::default()
            .with_service_name(env!("CARGO_PKG_NAME"))
            .with_log_level(&self.log_level)
            .with_json_output(self.log_json)
    }
}

/// Vault client configuration for `address`, with `VAULT_*` overrides.
///
/// # Errors
///
/// Returns [`DumpError::Config`] if an override is malformed.
pub fn vault_config(address: &str) -> Result<VaultConfig, DumpError> {
    VaultConfig::new(address.trim())
        .with_env_overrides()
        .map_err(|e| match e {
            VaultError::Platform(platform) => DumpError::Config(platform),
            other => DumpError::Config(PlatformError::invalid_config("vault", other.to_string())),
        })
}
