//! Shared proptest generators.

use crate::MockSecretStore;
use proptest::prelude::*;
use serde_json::{Map, Value};
use vault_kv_client::SecretMap;

/// Generate a single path segment.
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}"
}

/// Generate a path segment with optional leading/trailing slashes.
pub fn slashed_segment_strategy() -> impl Strategy<Value = (String, String)> {
    (segment_strategy(), any::<bool>(), any::<bool>()).prop_map(|(segment, lead, trail)| {
        let slashed = format!(
            "{}{}{}",
            if lead { "/" } else { "" },
            segment,
            if trail { "/" } else { "" }
        );
        (segment, slashed)
    })
}

/// Generate a secret record: a JSON object of scalar fields.
pub fn secret_record_strategy() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        "[ -~]{0,16}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ];
    prop::collection::btree_map("[a-z_]{1,10}", scalar, 0..5)
        .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>()))
}

/// Generate a leaf path under `root`.
///
/// Directory segments start with `d` and leaf names with `s`, so a leaf
/// can never also be a directory prefix of another leaf.
pub fn leaf_path_strategy(root: &'static str) -> impl Strategy<Value = String> {
    (
        prop::collection::vec("d[a-z0-9]{0,4}", 0..4),
        "s[a-z0-9]{0,6}",
    )
        .prop_map(move |(dirs, leaf)| {
            let mut parts = vec![root.to_string()];
            parts.extend(dirs);
            parts.push(leaf);
            parts.join("/")
        })
}

/// Generate a well-formed tree of secrets under `root`.
pub fn secret_tree_strategy(root: &'static str) -> impl Strategy<Value = SecretMap> {
    prop::collection::btree_map(leaf_path_strategy(root), secret_record_strategy(), 1..24)
}

/// Build a mock store holding exactly the given secrets.
#[must_use]
pub fn store_from_tree(tree: &SecretMap) -> MockSecretStore {
    tree.iter()
        .fold(MockSecretStore::new(), |store, (path, data)| {
            store.with_secret(path, data.clone())
        })
}
