//! Depth-first collection of every secret under a path.
//!
//! Pending directories are kept on an explicit stack, so traversal depth is
//! bounded by heap, not by the call stack. Each store call completes before
//! the next one starts.

use crate::{
    error::{VaultError, VaultResult},
    path,
    provider::SecretStore,
    secrets::SecretRecord,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Full secret path (no leading or trailing slash) to secret data.
pub type SecretMap = BTreeMap<String, SecretRecord>;

/// Collect every secret under `root` into `out`.
///
/// A path that lists successfully is a directory: entries ending in `/` are
/// descended into and every other entry is read as a leaf. A path whose
/// listing fails with [`VaultError::NotADirectory`] is itself read as a leaf
/// and recorded under the path exactly as it was given. Any other error
/// aborts the whole traversal.
///
/// # Errors
///
/// Returns the first store error other than `NotADirectory` on a listing.
#[instrument(skip(store, out))]
pub async fn collect<S>(store: &S, root: &str, out: &mut SecretMap) -> VaultResult<()>
where
    S: SecretStore + ?Sized,
{
    let before = out.len();
    let mut pending = vec![root.to_string()];

    while let Some(current) = pending.pop() {
        match store.list(&current).await {
            Ok(entries) => {
                debug!(path = %current, entries = entries.len(), "Walking directory");
                let mut subdirs = Vec::new();
                for entry in &entries {
                    let child = path::join(&current, entry);
                    if path::is_directory_entry(entry) {
                        subdirs.push(child);
                    } else {
                        read_into(store, child, out).await?;
                    }
                }
                // Reversed so the first listed sub-directory is walked first.
                pending.extend(subdirs.into_iter().rev());
            }
            Err(VaultError::NotADirectory(_)) => {
                debug!(path = %current, "Not a directory, reading as leaf");
                read_into(store, current, out).await?;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        root,
        collected = out.len().saturating_sub(before),
        "Collected secrets"
    );
    Ok(())
}

/// Collect every secret under `root` into a fresh map.
///
/// # Errors
///
/// See [`collect`].
pub async fn collect_all<S>(store: &S, root: &str) -> VaultResult<SecretMap>
where
    S: SecretStore + ?Sized,
{
    let mut out = SecretMap::new();
    collect(store, root, &mut out).await?;
    Ok(out)
}

async fn read_into<S>(store: &S, secret_path: String, out: &mut SecretMap) -> VaultResult<()>
where
    S: SecretStore + ?Sized,
{
    let version = store.read_current_version(&secret_path).await?;
    debug!(path = %secret_path, version = version.metadata.version, "Read secret");
    if out.insert(secret_path, version.data).is_some() {
        debug!("Path reached twice, keeping the last read");
    }
    Ok(())
}
