//! Test fixtures with sample data.

use crate::MockSecretStore;
use serde_json::json;
use vault_kv_client::SecretMap;

/// Username accepted by [`app_namespace`].
pub const TEST_USERNAME: &str = "reader";

/// Password accepted by [`app_namespace`].
pub const TEST_PASSWORD: &str = "correct-horse";

/// The `app` namespace: `app/db` and `app/cache/ttl`.
#[must_use]
pub fn app_namespace() -> MockSecretStore {
    MockSecretStore::new()
        .with_credentials(TEST_USERNAME, TEST_PASSWORD)
        .with_secret("app/db", json!({"user": "x"}))
        .with_secret("app/cache/ttl", json!({"seconds": 30}))
}

/// Expected collection of [`app_namespace`] from `app`.
#[must_use]
pub fn app_secrets() -> SecretMap {
    SecretMap::from([
        ("app/db".to_string(), json!({"user": "x"})),
        ("app/cache/ttl".to_string(), json!({"seconds": 30})),
    ])
}

/// A deeper namespace mixing directories, an empty directory, a deleted
/// version and an unrelated sibling tree.
#[must_use]
pub fn nested_namespace() -> MockSecretStore {
    MockSecretStore::new()
        .with_credentials(TEST_USERNAME, TEST_PASSWORD)
        .with_secret("team/svc/api", json!({"key": "abc", "rotate": true}))
        .with_secret("team/svc/db/primary", json!({"user": "svc", "port": 5432}))
        .with_secret("team/svc/db/replica", json!({"user": "svc-ro", "port": 5433}))
        .with_deleted("team/svc/legacy")
        .with_empty_dir("team/svc/unused")
        .with_secret("team/web", json!({"origin": "https://example.com"}))
        .with_secret("other/thing", json!({"x": 1}))
}

/// Expected collection of [`nested_namespace`] from `team`.
#[must_use]
pub fn nested_team_secrets() -> SecretMap {
    SecretMap::from([
        ("team/svc/api".to_string(), json!({"key": "abc", "rotate": true})),
        (
            "team/svc/db/primary".to_string(),
            json!({"user": "svc", "port": 5432}),
        ),
        (
            "team/svc/db/replica".to_string(),
            json!({"user": "svc-ro", "port": 5433}),
        ),
        ("team/svc/legacy".to_string(), serde_json::Value::Null),
        ("team/web".to_string(), json!({"origin": "https://example.com"})),
    ])
}
