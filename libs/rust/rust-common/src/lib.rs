//! Shared library for cross-cutting concerns in the vault-dump workspace.
//!
//! This crate provides centralized implementations for:
//! - Error types shared by the client library and the CLI
//! - HTTP client configuration and building
//! - Environment variable parsing helpers
//! - Tracing subscriber initialization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod http;
pub mod tracing_config;

pub use env::{parse_bool_env, parse_env, parse_optional_env};
pub use error::PlatformError;
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
