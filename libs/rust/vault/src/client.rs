//! Vault HTTP client for userpass login and KV v2 list/read.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    path,
    provider::{Authenticator, SecretStore},
    secrets::{AuthResponse, KvReadResponse, ListResponse, SecretVersion},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use rust_common::build_http_client;
use secrecy::{ExposeSecret, SecretString};
use std::iter;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Vault client holding a single login session.
#[derive(Debug)]
pub struct VaultClient {
    config: VaultConfig,
    base_url: Url,
    http: Client,
    token: RwLock<Option<SecretString>>,
}

impl VaultClient {
    /// Create a new Vault client.
    ///
    /// No request is made until [`Authenticator::login`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        let base_url = config.validate()?;
        let http = build_http_client(&config.http_config())?;

        Ok(Self {
            config,
            base_url,
            http,
            token: RwLock::new(None),
        })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> VaultResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                VaultError::InvalidConfig(format!("address {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    fn kv_endpoint(&self, kind: &str, secret_path: &str) -> VaultResult<Url> {
        self.endpoint(
            path::segments(&self.config.kv_mount)
                .chain(iter::once(kind))
                .chain(path::segments(secret_path)),
        )
    }

    async fn authorized(&self, method: Method, url: Url) -> VaultResult<RequestBuilder> {
        let token = self.token.read().await;
        let token = token.as_ref().ok_or(VaultError::NotAuthenticated)?;

        let request = self
            .http
            .request(method, url)
            .header(TOKEN_HEADER, token.expose_secret());
        Ok(self.with_namespace(request))
    }

    fn with_namespace(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.namespace {
            Some(namespace) => request.header(NAMESPACE_HEADER, namespace),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> VaultResult<Response> {
        request.send().await.map_err(transport_error)
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> VaultResult<T> {
        let text = response.text().await.map_err(transport_error)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Map a non-success status that has no operation-specific meaning.
    async fn status_error(status: StatusCode, path: &str, response: Response) -> VaultError {
        match status.as_u16() {
            403 => VaultError::denied(path),
            404 => VaultError::not_found(path),
            429 => VaultError::RateLimited,
            _ => {
                let text = response.text().await.unwrap_or_default();
                VaultError::unavailable(format!("Status {status}: {text}"))
            }
        }
    }
}

#[async_trait]
impl Authenticator for VaultClient {
    #[instrument(skip(self, password), fields(mount = %self.config.auth_mount))]
    async fn login(&self, username: &str, password: &SecretString) -> VaultResult<()> {
        let url = self.endpoint(
            iter::once("auth")
                .chain(path::segments(&self.config.auth_mount))
                .chain(["login", username]),
        )?;
        let body = serde_json::json!({ "password": password.expose_secret() });

        let response = Self::send(self.with_namespace(self.http.post(url).json(&body))).await?;
        let status = response.status();

        if status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(VaultError::unavailable(format!("Status {status}: {text}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VaultError::auth_failed(format!("Status {status}: {text}")));
        }

        let auth_response: AuthResponse = Self::json_body(response).await?;
        if auth_response.auth.client_token.is_empty() {
            return Err(VaultError::auth_failed("empty client token"));
        }

        info!(
            ttl_secs = auth_response.auth.lease_duration,
            policies = auth_response.auth.policies.len(),
            "Authenticated with Vault"
        );
        *self.token.write().await = Some(SecretString::from(auth_response.auth.client_token));
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    #[instrument(skip(self))]
    async fn list(&self, path: &str) -> VaultResult<Vec<String>> {
        let mut url = self.kv_endpoint("metadata", path)?;
        // Directory listings are addressed with a trailing slash.
        url.path_segments_mut()
            .map_err(|()| VaultError::InvalidConfig("address cannot be a base".to_string()))?
            .push("");
        url.query_pairs_mut().append_pair("list", "true");

        let response = Self::send(self.authorized(Method::GET, url).await?).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(path, "Listing returned 404");
            return Err(VaultError::not_a_directory(path));
        }
        if !status.is_success() {
            return Err(Self::status_error(status, path, response).await);
        }

        let body: ListResponse = Self::json_body(response).await?;
        debug!(path, entries = body.data.keys.len(), "Listed path");
        Ok(body.data.keys)
    }

    #[instrument(skip(self))]
    async fn read_current_version(&self, path: &str) -> VaultResult<SecretVersion> {
        let url = self.kv_endpoint("data", path)?;
        let response = Self::send(self.authorized(Method::GET, url).await?).await?;
        let status = response.status();

        if status.is_success() {
            let body: KvReadResponse = Self::json_body(response).await?;
            let kv = body
                .data
                .ok_or_else(|| VaultError::invalid_response(path, "missing data"))?;
            return Ok(kv.into());
        }

        if status == StatusCode::NOT_FOUND {
            // Deleted and destroyed versions answer 404 but still carry metadata.
            let text = response.text().await.unwrap_or_default();
            let kv = serde_json::from_str::<KvReadResponse>(&text)
                .ok()
                .and_then(|body| body.data);

            return match kv {
                Some(kv) if kv.metadata.destroyed => {
                    Err(VaultError::destroyed(path, kv.metadata.version))
                }
                Some(kv) => {
                    warn!(
                        path,
                        version = kv.metadata.version,
                        deletion_time = %kv.metadata.deletion_time,
                        "Current version is deleted"
                    );
                    Ok(kv.into())
                }
                None => Err(VaultError::not_found(path)),
            };
        }

        Err(Self::status_error(status, path, response).await)
    }
}

/// Connection-level failures mean the store is unreachable; anything else
/// (a request that could not be built, a redirect loop) stays an HTTP error.
fn transport_error(err: reqwest::Error) -> VaultError {
    if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        VaultError::unavailable(err.to_string())
    } else {
        VaultError::Http(err)
    }
}
