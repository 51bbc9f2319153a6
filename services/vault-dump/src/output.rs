//! JSON rendering of collected secrets.

use crate::error::DumpError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use vault_kv_client::SecretMap;

const INDENT: &[u8] = b"    ";

/// Serialize `value` as pretty JSON with a four-space indent.
///
/// # Errors
///
/// Returns [`DumpError::Output`] if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DumpError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| DumpError::Output(e.to_string()))
}

/// Write the secrets as one JSON object followed by a newline.
///
/// # Errors
///
/// Returns [`DumpError::Output`] if serialization or the write fails.
pub fn write_secrets<W: Write>(writer: &mut W, secrets: &SecretMap) -> Result<(), DumpError> {
    let json = to_pretty_json(secrets)?;
    writeln!(writer, "{json}")?;
    writer.flush()?;
    Ok(())
}
