//! Secret types and Vault wire structures.

use serde::Deserialize;

/// Data payload of one secret: field name to arbitrary JSON value.
///
/// Kept as a raw JSON value so soft-deleted versions (`null` data) and
/// non-string fields pass through unchanged.
pub type SecretRecord = serde_json::Value;

/// The current version of a secret as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretVersion {
    /// Secret fields, `null` when the version is soft-deleted
    pub data: SecretRecord,
    /// Version metadata
    pub metadata: KvMetadata,
}

impl SecretVersion {
    /// Whether this version has been soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.metadata.is_deleted()
    }
}

/// Vault KV v2 read response wrapper.
///
/// `data` is absent on a plain 404 and present (with null inner data) on
/// a 404 for a deleted or destroyed version.
#[derive(Debug, Deserialize)]
pub struct KvReadResponse {
    /// Version payload, if the store knows the secret
    #[serde(default)]
    pub data: Option<KvData>,
}

/// One version of a KV v2 secret.
#[derive(Debug, Deserialize)]
pub struct KvData {
    /// Secret fields
    #[serde(default)]
    pub data: SecretRecord,
    /// Version metadata
    pub metadata: KvMetadata,
}

impl From<KvData> for SecretVersion {
    fn from(kv: KvData) -> Self {
        Self {
            data: kv.data,
            metadata: kv.metadata,
        }
    }
}

/// Metadata of a single secret version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KvMetadata {
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_time: String,
    /// RFC 3339 deletion timestamp, empty while the version is live
    #[serde(default)]
    pub deletion_time: String,
    /// Whether the version data has been permanently removed
    #[serde(default)]
    pub destroyed: bool,
    /// Version number
    #[serde(default)]
    pub version: u64,
}

impl KvMetadata {
    /// A non-empty deletion time marks a soft-deleted version.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        !self.deletion_time.is_empty()
    }
}

/// Vault KV v2 metadata listing response.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    /// Listing payload
    pub data: ListData,
}

/// Entries of one directory listing.
#[derive(Debug, Deserialize)]
pub struct ListData {
    /// Child names; directories carry a trailing `/`
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Vault auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    /// Login result
    pub auth: AuthData,
}

/// Session granted by a successful login.
#[derive(Debug, Deserialize)]
pub struct AuthData {
    /// Token sent as `X-Vault-Token` on later calls
    pub client_token: String,
    /// Policies attached to the token
    #[serde(default)]
    pub policies: Vec<String>,
    /// Token TTL in seconds
    #[serde(default)]
    pub lease_duration: u64,
}
