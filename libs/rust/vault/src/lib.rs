//! HashiCorp Vault KV v2 client
//!
//! Provides userpass authentication, typed list/read operations against a
//! KV v2 mount, and a depth-first collector that flattens a subtree of the
//! namespace into a single path-to-record map.

pub mod client;
pub mod collector;
pub mod config;
pub mod error;
pub mod path;
pub mod provider;
pub mod secrets;

pub use client::VaultClient;
pub use collector::{SecretMap, collect, collect_all};
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use provider::{Authenticator, SecretStore};
pub use secrets::{SecretRecord, SecretVersion};
