//! Mock implementations for testing.
//!
//! [`MockSecretStore`] answers list and read calls the way a KV v2 mount
//! does: a path with children lists them, anything else fails listing with
//! `NotADirectory`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use vault_kv_client::{
    Authenticator, SecretRecord, SecretStore, SecretVersion, VaultError, VaultResult, path,
    secrets::KvMetadata,
};

const CREATED_TIME: &str = "2024-01-01T00:00:00Z";
const DELETION_TIME: &str = "2024-06-01T00:00:00Z";

/// State of the current version of a mock secret.
#[derive(Debug, Clone, PartialEq)]
enum MockVersion {
    Live(SecretRecord),
    Deleted,
    Destroyed,
}

/// A call observed by the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `login(username, ..)`
    Login(String),
    /// `list(path)`
    List(String),
    /// `read_current_version(path)`
    Read(String),
}

/// In-memory secret store for testing.
#[derive(Debug, Default)]
pub struct MockSecretStore {
    secrets: BTreeMap<String, MockVersion>,
    empty_dirs: BTreeSet<String>,
    denied: BTreeSet<String>,
    credentials: Option<(String, String)>,
    reverse_listings: bool,
    unavailable: bool,
    logged_in: RwLock<bool>,
    calls: Arc<RwLock<Vec<StoreCall>>>,
}

impl MockSecretStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live secret at `path`.
    #[must_use]
    pub fn with_secret(mut self, path: &str, data: SecretRecord) -> Self {
        self.secrets
            .insert(path::normalize(path), MockVersion::Live(data));
        self
    }

    /// Add a secret whose current version is soft-deleted.
    #[must_use]
    pub fn with_deleted(mut self, path: &str) -> Self {
        self.secrets.insert(path::normalize(path), MockVersion::Deleted);
        self
    }

    /// Add a secret whose current version is destroyed.
    #[must_use]
    pub fn with_destroyed(mut self, path: &str) -> Self {
        self.secrets
            .insert(path::normalize(path), MockVersion::Destroyed);
        self
    }

    /// Add a directory with no entries.
    #[must_use]
    pub fn with_empty_dir(mut self, path: &str) -> Self {
        self.empty_dirs.insert(path::normalize(path));
        self
    }

    /// Deny list and read access to `path`.
    #[must_use]
    pub fn with_denied(mut self, path: &str) -> Self {
        self.denied.insert(path::normalize(path));
        self
    }

    /// Only accept this username/password pair on login.
    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    /// Return listing entries in reverse lexical order.
    #[must_use]
    pub const fn with_reversed_listings(mut self) -> Self {
        self.reverse_listings = true;
        self
    }

    /// Fail every call as if the server were unreachable.
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Get all observed calls in order.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    /// Count reads performed so far.
    pub async fn read_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| matches!(call, StoreCall::Read(_)))
            .count()
    }

    async fn record(&self, call: StoreCall) {
        self.calls.write().await.push(call);
    }

    fn check_access(&self, key: &str) -> VaultResult<()> {
        if self.unavailable {
            return Err(VaultError::unavailable("mock store unavailable"));
        }
        if self.denied.contains(key) {
            return Err(VaultError::denied(key));
        }
        Ok(())
    }

    fn children(&self, key: &str) -> BTreeSet<String> {
        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{key}/")
        };

        let secrets = self.secrets.keys().map(|k| (k, false));
        let dirs = self.empty_dirs.iter().map(|k| (k, true));

        secrets
            .chain(dirs)
            .filter_map(|(candidate, is_dir)| {
                let rest = candidate.strip_prefix(&prefix)?;
                if rest.is_empty() {
                    return None;
                }
                Some(match rest.split_once('/') {
                    Some((first, _)) => format!("{first}/"),
                    None if is_dir => format!("{rest}/"),
                    None => rest.to_string(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn list(&self, path: &str) -> VaultResult<Vec<String>> {
        self.record(StoreCall::List(path.to_string())).await;
        let key = path::normalize(path);
        self.check_access(&key)?;

        let children = self.children(&key);
        if children.is_empty() && !self.empty_dirs.contains(&key) {
            return Err(VaultError::not_a_directory(path));
        }

        let mut entries: Vec<String> = children.into_iter().collect();
        if self.reverse_listings {
            entries.reverse();
        }
        Ok(entries)
    }

    async fn read_current_version(&self, path: &str) -> VaultResult<SecretVersion> {
        self.record(StoreCall::Read(path.to_string())).await;
        let key = path::normalize(path);
        self.check_access(&key)?;

        let live_metadata = KvMetadata {
            created_time: CREATED_TIME.to_string(),
            version: 1,
            ..KvMetadata::default()
        };

        match self.secrets.get(&key) {
            Some(MockVersion::Live(data)) => Ok(SecretVersion {
                data: data.clone(),
                metadata: live_metadata,
            }),
            Some(MockVersion::Deleted) => Ok(SecretVersion {
                data: SecretRecord::Null,
                metadata: KvMetadata {
                    deletion_time: DELETION_TIME.to_string(),
                    ..live_metadata
                },
            }),
            Some(MockVersion::Destroyed) => Err(VaultError::destroyed(path, 1)),
            None => Err(VaultError::not_found(path)),
        }
    }
}

#[async_trait]
impl Authenticator for MockSecretStore {
    async fn login(&self, username: &str, password: &SecretString) -> VaultResult<()> {
        self.record(StoreCall::Login(username.to_string())).await;
        if self.unavailable {
            return Err(VaultError::unavailable("mock store unavailable"));
        }

        let accepted = self.credentials.as_ref().is_none_or(|(user, pass)| {
            user == username && pass.as_str() == password.expose_secret()
        });
        if !accepted {
            return Err(VaultError::auth_failed("invalid username or password"));
        }

        *self.logged_in.write().await = true;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        *self.logged_in.read().await
    }
}
