//! vault-dump
//!
//! Logs in to Vault with userpass credentials, walks a KV v2 path
//! depth-first and prints every secret found as one JSON object keyed by
//! full secret path.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use app::{authenticate, dump, run};
pub use cli::Args;
pub use config::Settings;
pub use error::DumpError;
