//! Secret path helpers.

/// Join a parent path and a listing entry into a normalized child path.
///
/// Empty segments are dropped, so the result has no leading, trailing or
/// doubled `/` regardless of how the inputs are bounded.
///
/// ```
/// use vault_kv_client::path::join;
///
/// assert_eq!(join("a/", "/b"), "a/b");
/// assert_eq!(join("app", "cache/"), "app/cache");
/// assert_eq!(join("", "db"), "db");
/// ```
#[must_use]
pub fn join(parent: &str, entry: &str) -> String {
    normalize(&format!("{parent}/{entry}"))
}

/// Collapse a path to its non-empty segments joined by single slashes.
#[must_use]
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Iterate over the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Listing entries with a trailing separator are sub-directories.
#[must_use]
pub fn is_directory_entry(entry: &str) -> bool {
    entry.ends_with('/')
}
