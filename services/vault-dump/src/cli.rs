//! Command-line arguments.

use crate::error::DumpError;
use clap::{Parser, error::ErrorKind};
use secrecy::SecretString;
use std::convert::Infallible;
use std::ffi::OsString;

/// Number of positional operands a dump takes.
pub const OPERANDS: usize = 4;

/// Positional arguments: address, username, password, path.
#[derive(Debug, Parser)]
#[command(name = "vault-dump", version, about)]
pub struct Args {
    /// Vault server address, e.g. https://vault.example.com:8200
    #[arg(value_name = "vault-address")]
    pub vault_address: String,

    /// Userpass username
    #[arg(value_name = "vault-username", allow_hyphen_values = true)]
    pub vault_username: String,

    /// Userpass password
    #[arg(
        value_name = "vault-password",
        allow_hyphen_values = true,
        value_parser = parse_secret
    )]
    pub vault_password: SecretString,

    /// Secret path to read, relative to the KV mount
    #[arg(value_name = "path-to-read", allow_hyphen_values = true)]
    pub path_to_read: String,
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(value))
}

/// Result of parsing the command line.
#[derive(Debug)]
pub enum Invocation {
    /// Run a dump with these arguments
    Run(Args),
    /// Print help or version text and exit successfully
    Info(String),
}

impl Args {
    /// Parse arguments from an iterator (first item is the program name).
    ///
    /// Exactly [`OPERANDS`] operands are always taken as raw values, so a
    /// password such as `--help` or `--` is passed through unchanged. Help
    /// and version flags are only honored for any other operand count.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Usage`] for a wrong number of arguments.
    pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, DumpError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut argv: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if argv.len() == OPERANDS + 1 {
            argv.insert(1, OsString::from("--"));
        }

        match Self::try_parse_from(argv) {
            Ok(args) => Ok(Invocation::Run(args)),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Ok(Invocation::Info(e.to_string()))
            }
            Err(e) => Err(DumpError::Usage(e.to_string())),
        }
    }

    /// The password as a secret.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.vault_password
    }
}
