//! Vault client configuration.

use crate::error::{VaultError, VaultResult};
use rust_common::{HttpConfig, parse_bool_env, parse_env, parse_optional_env};
use std::time::Duration;
use url::Url;

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address
    pub addr: String,
    /// KV v2 secrets engine mount path
    pub kv_mount: String,
    /// Userpass auth method mount path
    pub auth_mount: String,
    /// Enterprise namespace, sent as `X-Vault-Namespace`
    pub namespace: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Accept invalid TLS certificates
    pub skip_verify: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: "http://127.0.0.1:8200".to_string(),
            kv_mount: "secret".to_string(),
            auth_mount: "userpass".to_string(),
            namespace: None,
            timeout: Duration::from_secs(30),
            skip_verify: false,
        }
    }
}

impl VaultConfig {
    /// Create a new configuration for the given address.
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Apply `VAULT_KV_MOUNT`, `VAULT_AUTH_MOUNT`, `VAULT_NAMESPACE`,
    /// `VAULT_SKIP_VERIFY` and `VAULT_REQUEST_TIMEOUT` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Platform`] if a variable is set but malformed.
    pub fn with_env_overrides(mut self) -> VaultResult<Self> {
        if let Some(mount) = parse_optional_env::<String>("VAULT_KV_MOUNT")? {
            self.kv_mount = mount;
        }
        if let Some(mount) = parse_optional_env::<String>("VAULT_AUTH_MOUNT")? {
            self.auth_mount = mount;
        }
        if let Some(namespace) = parse_optional_env::<String>("VAULT_NAMESPACE")? {
            self.namespace = Some(namespace);
        }
        self.skip_verify = parse_bool_env("VAULT_SKIP_VERIFY", self.skip_verify)?;
        self.timeout = Duration::from_secs(parse_env(
            "VAULT_REQUEST_TIMEOUT",
            self.timeout.as_secs(),
        )?);
        Ok(self)
    }

    /// Set KV mount path.
    #[must_use]
    pub fn with_kv_mount(mut self, mount: impl Into<String>) -> Self {
        self.kv_mount = mount.into();
        self
    }

    /// Set userpass auth mount path.
    #[must_use]
    pub fn with_auth_mount(mut self, mount: impl Into<String>) -> Self {
        self.auth_mount = mount.into();
        self
    }

    /// Set namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub const fn with_skip_verify(mut self, skip_verify: bool) -> Self {
        self.skip_verify = skip_verify;
        self
    }

    /// Validate the configuration and return the parsed base address.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for a malformed or non-HTTP
    /// address, an empty mount path, or a zero timeout.
    pub fn validate(&self) -> VaultResult<Url> {
        let url = Url::parse(self.addr.trim())
            .map_err(|e| VaultError::InvalidConfig(format!("address {}: {e}", self.addr)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(VaultError::InvalidConfig(format!(
                "address {} must be an http(s) URL",
                self.addr
            )));
        }
        if self.kv_mount.trim_matches('/').is_empty() {
            return Err(VaultError::InvalidConfig("KV mount path is empty".to_string()));
        }
        if self.auth_mount.trim_matches('/').is_empty() {
            return Err(VaultError::InvalidConfig("auth mount path is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(VaultError::InvalidConfig(
                "request timeout must be greater than 0".to_string(),
            ));
        }
        Ok(url)
    }

    /// HTTP client settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
            .with_timeout(self.timeout)
            .with_accept_invalid_certs(self.skip_verify)
    }
}
