//! Store abstraction used by the collector.
//!
//! [`VaultClient`](crate::VaultClient) implements both traits over HTTP;
//! tests substitute an in-memory store.

use crate::{error::VaultResult, secrets::SecretVersion};
use async_trait::async_trait;
use secrecy::SecretString;

/// Read-only access to a hierarchical versioned secret store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the immediate children of `path`.
    ///
    /// Entries ending in `/` are sub-directories. Fails with
    /// [`VaultError::NotADirectory`](crate::VaultError::NotADirectory) when
    /// `path` does not behave as a directory.
    async fn list(&self, path: &str) -> VaultResult<Vec<String>>;

    /// Read the current version of the secret at `path`.
    ///
    /// A soft-deleted current version is returned rather than treated as
    /// missing; a destroyed one fails with
    /// [`VaultError::SecretDestroyed`](crate::VaultError::SecretDestroyed).
    async fn read_current_version(&self, path: &str) -> VaultResult<SecretVersion>;
}

/// Username/password login against the store.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Log in and keep the resulting token for subsequent calls.
    async fn login(&self, username: &str, password: &SecretString) -> VaultResult<()>;

    /// Whether a token is currently held.
    async fn is_authenticated(&self) -> bool;
}
