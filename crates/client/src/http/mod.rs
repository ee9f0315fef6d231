//! HTTP client pair.
//!
//! Both clients share one `reqwest` transport (connection pool, timeout,
//! `Content-Type: application/json`). The authenticated client reads the
//! bearer token from a [`TokenStore`] before every request; the public client
//! never attaches credentials.

mod token;

pub use token::{
    ACCESS_TOKEN_KEY, FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError,
};

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoints::{Endpoint, Endpoints};
use crate::error::{ClientError, ERROR_BODY_LIMIT, Result};

// =============================================================================
// HttpClient
// =============================================================================

/// One side of the client pair: a verb-level JSON client.
#[derive(Clone)]
pub struct HttpClient {
    transport: reqwest::Client,
    credentials: Option<Arc<dyn TokenStore>>,
    token_read_timeout: Duration,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("authenticated", &self.is_authenticated())
            .field("token_read_timeout", &self.token_read_timeout)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Client that never sends credentials.
    #[must_use]
    pub const fn anonymous(transport: reqwest::Client) -> Self {
        Self {
            transport,
            credentials: None,
            token_read_timeout: Duration::ZERO,
        }
    }

    /// Client that attaches `Authorization: Bearer <token>` whenever `tokens`
    /// holds a non-empty token.
    #[must_use]
    pub fn with_credentials(
        transport: reqwest::Client,
        tokens: Arc<dyn TokenStore>,
        token_read_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            credentials: Some(tokens),
            token_read_timeout,
        }
    }

    /// Whether this client consults a token store.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// GET `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.request(Method::GET, url, None::<&()>).await
    }

    /// POST `body` as JSON to `url` and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.request(Method::POST, url, Some(body)).await
    }

    /// PUT `body` as JSON to `url` and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, url, Some(body)).await
    }

    /// DELETE `url` and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.request(Method::DELETE, url, None::<&()>).await
    }

    /// Send a request and decode its JSON response.
    ///
    /// An empty 2xx body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Transport` if no response arrived
    /// - `ClientError::Status` for a 4xx/5xx response
    /// - `ClientError::Decode` if the body does not match `T`
    pub async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.transport.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let builder = self.authorize(builder).await;

        debug!(method = %method, url = %url, "Sending request");
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                url = %url,
                body = %text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(ClientError::from_status(status, &text));
        }

        decode(&url, &text)
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token().await {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Read the token within the configured bound. Every failure mode means
    /// "send without credentials".
    async fn bearer_token(&self) -> Option<SecretString> {
        let store = self.credentials.as_ref()?;

        match tokio::time::timeout(self.token_read_timeout, store.read_token()).await {
            Ok(Ok(Some(token))) if !token.expose_secret().trim().is_empty() => {
                debug!("Attaching bearer token");
                Some(token)
            }
            Ok(Ok(_)) => {
                debug!("No access token stored, sending request without credentials");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to read access token, sending request without credentials");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.token_read_timeout.as_millis()).unwrap_or(u64::MAX),
                    "Timed out reading access token, sending request without credentials"
                );
                None
            }
        }
    }
}

/// Decode a 2xx body into `T`.
fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };

    serde_json::from_str(body).map_err(|source| {
        error!(
            error = %source,
            url = %url,
            body = %body.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
            "Failed to decode backend response"
        );
        ClientError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

/// Build the shared transport.
fn build_transport(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Setup(e.to_string()))
}

// =============================================================================
// ApiClient
// =============================================================================

/// The endpoint registry plus the client pair.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    endpoints: Endpoints,
    public: HttpClient,
    authenticated: HttpClient,
}

impl ApiClient {
    /// Build the client pair for `config`, reading bearer tokens from `tokens`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Setup` if the base URL is unusable or the
    /// transport cannot be built.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let endpoints = Endpoints::new(config.api_base_url.clone())?;
        let transport = build_transport(config.http_timeout)?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                endpoints,
                public: HttpClient::anonymous(transport.clone()),
                authenticated: HttpClient::with_credentials(
                    transport,
                    tokens,
                    config.token_read_timeout,
                ),
            }),
        })
    }

    /// The endpoint registry.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// The client that never attaches credentials.
    #[must_use]
    pub fn public(&self) -> &HttpClient {
        &self.inner.public
    }

    /// The client that attaches the bearer token when one is stored.
    #[must_use]
    pub fn authenticated(&self) -> &HttpClient {
        &self.inner.authenticated
    }

    /// The client an endpoint is sent through.
    #[must_use]
    pub fn client_for(&self, endpoint: &Endpoint) -> &HttpClient {
        if endpoint.requires_auth() {
            self.authenticated()
        } else {
            self.public()
        }
    }

    /// Absolute URL for `endpoint`.
    #[must_use]
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        self.inner.endpoints.url(endpoint)
    }

    /// Call a body-less endpoint.
    ///
    /// # Errors
    ///
    /// Propagates the client's `ClientError` unchanged.
    pub async fn call<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        self.client_for(endpoint)
            .request(endpoint.method(), self.url(endpoint), None::<&()>)
            .await
    }

    /// Call an endpoint with a JSON body.
    ///
    /// # Errors
    ///
    /// Propagates the client's `ClientError` unchanged.
    pub async fn send<B, T>(&self, endpoint: &Endpoint, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.client_for(endpoint)
            .request(endpoint.method(), self.url(endpoint), Some(body))
            .await
    }
}
