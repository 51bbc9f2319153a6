//! Login, then collect.

use crate::{cli::Args, config::vault_config, error::DumpError};
use secrecy::SecretString;
use tracing::{error, info, instrument, warn};
use vault_kv_client::{Authenticator, SecretMap, SecretStore, VaultClient, collect_all};

/// Log in on an existing session.
///
/// # Errors
///
/// Returns [`DumpError::Auth`] for any login failure, whether the
/// credentials were rejected or the store could not be reached.
pub async fn login<A>(
    session: &A,
    username: &str,
    password: &SecretString,
) -> Result<(), DumpError>
where
    A: Authenticator + ?Sized,
{
    session.login(username, password).await.map_err(|e| {
        warn!(error = %e, "Login failed");
        DumpError::Auth(e)
    })
}

/// Build a client for `address` and log in with userpass credentials.
///
/// An address the client cannot use is reported as a failed login.
///
/// # Errors
///
/// Returns [`DumpError::Config`] for malformed `VAULT_*` settings and
/// [`DumpError::Auth`] otherwise.
#[instrument(skip(password))]
pub async fn authenticate(
    address: &str,
    username: &str,
    password: &SecretString,
) -> Result<VaultClient, DumpError> {
    let client = VaultClient::new(vault_config(address)?).map_err(|e| {
        warn!(error = %e, "Cannot build Vault client");
        DumpError::Auth(e)
    })?;
    login(&client, username, password).await?;
    Ok(client)
}

/// Collect everything under `path` from an authenticated session.
///
/// # Errors
///
/// Returns [`DumpError::Store`] with the first fatal list or read error.
pub async fn collect_secrets<S>(session: &S, path: &str) -> Result<SecretMap, DumpError>
where
    S: SecretStore + ?Sized,
{
    collect_all(session, path).await.map_err(|e| {
        error!(error = %e, path, "Traversal aborted");
        DumpError::Store(e)
    })
}

/// Log in on `session` and collect everything under `path`.
///
/// # Errors
///
/// See [`login`] and [`collect_secrets`].
pub async fn dump<S>(
    session: &S,
    username: &str,
    password: &SecretString,
    path: &str,
) -> Result<SecretMap, DumpError>
where
    S: SecretStore + Authenticator + ?Sized,
{
    login(session, username, password).await?;
    collect_secrets(session, path).await
}

/// Run a dump for parsed command-line arguments.
///
/// # Errors
///
/// See [`authenticate`] and [`collect_secrets`].
pub async fn run(args: &Args) -> Result<SecretMap, DumpError> {
    let client = authenticate(&args.vault_address, &args.vault_username, args.password()).await?;
    let secrets = collect_secrets(&client, &args.path_to_read).await?;
    info!(count = secrets.len(), "Dump complete");
    Ok(secrets)
}
