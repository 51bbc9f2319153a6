//! Shared test utilities for the vault-dump workspace.
//!
//! This crate provides:
//! - An in-memory secret store implementing the client traits
//! - Proptest generators for paths and secret trees
//! - Test fixtures with sample namespaces

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockSecretStore, StoreCall};
