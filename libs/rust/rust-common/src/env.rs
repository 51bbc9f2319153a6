//! Environment variable parsing helpers.
//!
//! Unset variables fall back to a default; set but unparseable variables
//! are reported as [`PlatformError::InvalidConfig`].

use crate::PlatformError;
use std::{env, str::FromStr};

/// Parse an environment variable with a default value.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] if the variable is set but
/// cannot be parsed as `T`.
pub fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, PlatformError>
where
    T::Err: std::fmt::Display,
{
    parse_optional_env(name).map(|value| value.unwrap_or(default))
}

/// Parse an environment variable that has no default.
///
/// Empty values are treated as unset.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] if the variable is set but
/// cannot be parsed as `T`.
pub fn parse_optional_env<T: FromStr>(name: &str) -> Result<Option<T>, PlatformError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| PlatformError::invalid_config(name, e.to_string())),
        Err(_) => Ok(None),
    }
}

/// Parse a boolean flag, accepting `1/0`, `true/false`, `yes/no` and `on/off`.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] for any other value.
pub fn parse_bool_env(name: &str, default: bool) -> Result<bool, PlatformError> {
    match env::var(name) {
        Ok(val) => parse_bool(&val)
            .ok_or_else(|| PlatformError::invalid_config(name, format!("not a boolean: {val}"))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
