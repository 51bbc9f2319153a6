//! HTTP client tests against a mock Vault server.

use secrecy::SecretString;
use serde_json::json;
use vault_kv_client::{
    Authenticator, SecretStore, VaultClient, VaultConfig, VaultError, collect_all,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "hvs.test-token";

fn login_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "auth": {
            "client_token": TOKEN,
            "policies": ["default", "reader"],
            "lease_duration": 2_764_800,
            "renewable": true
        }
    }))
}

fn list_response(keys: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": { "keys": keys } }))
}

fn read_response(data: serde_json::Value, version: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "data": data,
            "metadata": {
                "created_time": "2024-01-01T00:00:00Z",
                "deletion_time": "",
                "destroyed": false,
                "version": version
            }
        }
    }))
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "errors": [] }))
}

async fn logged_in_client(server: &MockServer) -> VaultClient {
    logged_in_client_with(server, VaultConfig::new(server.uri())).await
}

async fn logged_in_client_with(server: &MockServer, config: VaultConfig) -> VaultClient {
    Mock::given(method("POST"))
        .and(path("/v1/auth/userpass/login/reader"))
        .respond_with(login_response())
        .mount(server)
        .await;

    let client = VaultClient::new(config).unwrap();
    client
        .login("reader", &SecretString::from("pw"))
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn test_login_sends_password_and_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/userpass/login/reader"))
        .and(body_json(json!({ "password": "pw" })))
        .respond_with(login_response())
        .expect(1)
        .mount(&server)
        .await;

    let client = VaultClient::new(VaultConfig::new(server.uri())).unwrap();
    assert!(!client.is_authenticated().await);

    client
        .login("reader", &SecretString::from("pw"))
        .await
        .unwrap();
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_uses_custom_auth_mount_and_namespace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/people/login/reader"))
        .and(header("X-Vault-Namespace", "team-a"))
        .respond_with(login_response())
        .expect(1)
        .mount(&server)
        .await;

    let config = VaultConfig::new(server.uri())
        .with_auth_mount("people")
        .with_namespace("team-a");
    let client = VaultClient::new(config).unwrap();
    client
        .login("reader", &SecretString::from("pw"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/userpass/login/reader"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "errors": ["invalid username or password"] })),
        )
        .mount(&server)
        .await;

    let client = VaultClient::new(VaultConfig::new(server.uri())).unwrap();
    let err = client
        .login("reader", &SecretString::from("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::AuthenticationFailed(_)));
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("sealed"))
        .mount(&server)
        .await;

    let client = VaultClient::new(VaultConfig::new(server.uri())).unwrap();
    let err = client
        .login("reader", &SecretString::from("pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Unavailable(_)));
}

#[tokio::test]
async fn test_login_unreachable_is_unavailable() {
    let client = VaultClient::new(VaultConfig::new("http://127.0.0.1:1")).unwrap();
    let err = client
        .login("reader", &SecretString::from("pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Unavailable(_)));
}

#[tokio::test]
async fn test_list_sends_token_and_returns_keys() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/app/"))
        .and(query_param("list", "true"))
        .and(header("X-Vault-Token", TOKEN))
        .respond_with(list_response(&["db", "cache/"]))
        .expect(1)
        .mount(&server)
        .await;

    let keys = client.list("app").await.unwrap();
    assert_eq!(keys, vec!["db", "cache/"]);
}

#[tokio::test]
async fn test_list_404_is_not_a_directory() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/app/db/"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let err = client.list("app/db").await.unwrap_err();
    assert!(err.is_not_a_directory());
}

#[tokio::test]
async fn test_list_status_mapping() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/locked/"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errors": ["permission denied"] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/busy/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/broken/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    assert!(matches!(
        client.list("locked").await,
        Err(VaultError::PermissionDenied(_))
    ));
    assert!(matches!(client.list("busy").await, Err(VaultError::RateLimited)));
    assert!(matches!(
        client.list("broken").await,
        Err(VaultError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_read_current_version() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/db"))
        .and(header("X-Vault-Token", TOKEN))
        .respond_with(read_response(json!({ "user": "x", "port": 5432 }), 3))
        .mount(&server)
        .await;

    let version = client.read_current_version("app/db").await.unwrap();
    assert_eq!(version.data, json!({ "user": "x", "port": 5432 }));
    assert_eq!(version.metadata.version, 3);
    assert!(!version.is_deleted());
}

#[tokio::test]
async fn test_read_deleted_version_is_captured() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/old"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": {
                "data": null,
                "metadata": {
                    "created_time": "2024-01-01T00:00:00Z",
                    "deletion_time": "2024-03-01T00:00:00Z",
                    "destroyed": false,
                    "version": 2
                }
            }
        })))
        .mount(&server)
        .await;

    let version = client.read_current_version("app/old").await.unwrap();
    assert!(version.data.is_null());
    assert!(version.is_deleted());
}

#[tokio::test]
async fn test_read_destroyed_version_fails() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/burnt"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": {
                "data": null,
                "metadata": {
                    "created_time": "2024-01-01T00:00:00Z",
                    "deletion_time": "",
                    "destroyed": true,
                    "version": 5
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client.read_current_version("app/burnt").await.unwrap_err();
    assert!(matches!(err, VaultError::SecretDestroyed { version: 5, .. }));
}

#[tokio::test]
async fn test_read_missing_is_not_found() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/none"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let err = client.read_current_version("app/none").await.unwrap_err();
    assert!(matches!(err, VaultError::SecretNotFound(_)));
}

#[tokio::test]
async fn test_read_garbage_body_is_serialization_error() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/odd"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.read_current_version("app/odd").await.unwrap_err();
    assert!(matches!(err, VaultError::Serialization(_)));
}

#[tokio::test]
async fn test_collect_over_http() {
    let server = MockServer::start().await;
    let client =
        logged_in_client_with(&server, VaultConfig::new(server.uri()).with_kv_mount("kv")).await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/metadata/app/"))
        .respond_with(list_response(&["db", "cache/"]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/metadata/app/cache/"))
        .respond_with(list_response(&["ttl"]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/data/app/db"))
        .respond_with(read_response(json!({ "user": "x" }), 1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/data/app/cache/ttl"))
        .respond_with(read_response(json!({ "seconds": 30 }), 1))
        .mount(&server)
        .await;

    let out = collect_all(&client, "app").await.unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out["app/db"], json!({ "user": "x" }));
    assert_eq!(out["app/cache/ttl"], json!({ "seconds": 30 }));
}

#[tokio::test]
async fn test_leaf_start_path_over_http() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/app/db/"))
        .respond_with(not_found())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app/db"))
        .respond_with(read_response(json!({ "user": "x" }), 1))
        .mount(&server)
        .await;

    let out = collect_all(&client, "app/db").await.unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out["app/db"], json!({ "user": "x" }));
}
