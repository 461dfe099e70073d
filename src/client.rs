//! Core HTTP clients for the Bitnomial REST API.
//!
//! [`BitnomialClient`] is the entry point for the unauthenticated product
//! endpoints. [`AuthBitnomialClient`] wraps it with a connection id and auth
//! token and signs every request with the scheme in [`crate::auth`].
//!
//! Endpoint methods are added via `impl` blocks in the [`crate::api`]
//! module.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::auth::{self, QueryParams};
use crate::constants::{API_BASE_URL, CONNECTION_ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::error::RestError;
use crate::types::enums::Env;

/// HTTP client for the unauthenticated Bitnomial REST endpoints.
///
/// # Example
///
/// ```no_run
/// use btnl_rs::client::BitnomialClient;
/// use btnl_rs::types::enums::Env;
/// use btnl_rs::types::products::ProductQuery;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), btnl_rs::error::RestError> {
/// let client = BitnomialClient::new(Env::Prod);
/// let specs = client.get_product_specs(&ProductQuery::default()).await?;
/// println!("{} products listed", specs.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BitnomialClient {
    http: reqwest::Client,
    /// Base URL for REST requests (defaults to [`API_BASE_URL`]).
    base_url: String,
    /// Which environment prefix routes carry.
    env: Env,
}

impl BitnomialClient {
    /// Create a client against the default base URL.
    pub fn new(env: Env) -> Self {
        Self::with_base_url(API_BASE_URL, env)
    }

    /// Create a client pointing at a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: impl Into<String>, env: Env) -> Self {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            env,
        }
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the environment.
    pub fn env(&self) -> Env {
        self.env
    }

    /// Route path under the environment prefix, e.g. `/prod/orders`.
    pub(crate) fn route(&self, suffix: &str) -> String {
        format!("/{}{}", self.env.as_str(), suffix)
    }

    /// Perform an unauthenticated GET and deserialize the JSON response.
    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        route: &str,
        params: &QueryParams,
    ) -> Result<R, RestError> {
        let url = format!("{}{}", self.base_url, route);
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .query(&params.pairs())
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Read a response, returning either the deserialized body or a
    /// [`RestError`].
    ///
    /// Uses `bytes()` + `serde_json::from_slice()` to avoid the UTF-8
    /// validation that `text()` + `from_str()` would incur.
    pub(crate) async fn handle_response<R: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<R, RestError> {
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(RestError::Decode)
        } else {
            Err(RestError::Http {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
    }
}

/// HTTP client for the HMAC-authenticated Bitnomial REST endpoints.
///
/// Holds the connection id and the auth token in its textual (hex) form —
/// the signer keys HMAC-SHA256 with the text's UTF-8 bytes, never the
/// decoded token.
///
/// # Example
///
/// ```no_run
/// use btnl_rs::client::{AuthBitnomialClient, BitnomialClient};
/// use btnl_rs::types::enums::Env;
/// use btnl_rs::types::orders::HistoryQuery;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), btnl_rs::error::RestError> {
/// let client = AuthBitnomialClient::new(BitnomialClient::new(Env::Prod), 42, "…64 hex chars…");
/// let page = client.get_orders(&HistoryQuery::default()).await?;
/// println!("{} orders", page.data.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBitnomialClient {
    inner: BitnomialClient,
    connection_id: u64,
    auth_token: String,
}

impl AuthBitnomialClient {
    /// Wrap a client with signing credentials.
    pub fn new(
        inner: BitnomialClient,
        connection_id: u64,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            connection_id,
            auth_token: auth_token.into(),
        }
    }

    /// The unauthenticated client, for the public endpoints.
    pub fn public(&self) -> &BitnomialClient {
        &self.inner
    }

    /// Returns the connection id used for signing.
    pub fn connection_id(&self) -> u64 {
        self.connection_id
    }

    /// Perform a signed GET and deserialize the JSON response.
    ///
    /// `route` is the path under the environment prefix (e.g. `/orders`);
    /// the signature covers the prefixed path and the canonical form of
    /// `params`, while the transmitted query string is URL-encoded by the
    /// HTTP layer.
    pub(crate) async fn signed_get<R: DeserializeOwned>(
        &self,
        route: &str,
        params: &QueryParams,
    ) -> Result<R, RestError> {
        let path = self.inner.route(route);
        let timestamp = auth::auth_timestamp(chrono::Utc::now());
        let signature = auth::signature(
            "GET",
            &path,
            params,
            &timestamp,
            self.connection_id,
            &self.auth_token,
        )?;

        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!(%url, "GET (signed)");

        let resp = self
            .inner
            .http
            .get(&url)
            .query(&params.pairs())
            .header(CONNECTION_ID_HEADER, self.connection_id.to_string())
            .header(TIMESTAMP_HEADER, timestamp.as_str())
            .header(SIGNATURE_HEADER, signature.as_str())
            .send()
            .await?;

        BitnomialClient::handle_response(resp).await
    }
}
