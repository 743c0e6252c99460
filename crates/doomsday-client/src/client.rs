//! ipsw.me catalog API client implementation.

use crate::api::DevicesApi;
use crate::config::RateLimitConfig;
use doomsday_core::{DoomsdayError, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    RateLimiter,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The ipsw.me API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.ipsw.me/v4";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the ipsw.me firmware catalog
#[derive(Clone)]
pub struct IpswClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl IpswClient {
    /// Create a new client against the public API using default settings
    pub fn new() -> Result<Self> {
        IpswClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> IpswClientBuilder {
        IpswClientBuilder::new()
    }

    /// Access device endpoints
    #[must_use]
    pub fn devices(&self) -> DevicesApi<'_> {
        DevicesApi::new(self)
    }

    /// The base URL requests are issued against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(path, params)?;

        self.inner.rate_limiter.until_ready().await;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DoomsdayError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// Build a URL under the base URL with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.inner.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|e| DoomsdayError::InvalidUrl(format!("{raw}: {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DoomsdayError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(DoomsdayError::Json)
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a `DoomsdayError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let resource = response.url().path().to_string();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        // Error bodies are sometimes JSON with a "message" field
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            404 => Err(DoomsdayError::NotFound { resource }),
            429 => {
                warn!("Rate limited by catalog API");
                Err(DoomsdayError::RateLimited { retry_after })
            }
            _ => Err(DoomsdayError::Api {
                code: status,
                message,
            }),
        }
    }
}

impl std::fmt::Debug for IpswClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpswClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring an [`IpswClient`]
#[derive(Debug, Clone)]
pub struct IpswClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    rate_limit: RateLimitConfig,
}

impl Default for IpswClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IpswClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Set the base URL (useful for testing and mirrors)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the catalog request throttle
    #[must_use]
    pub const fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<IpswClient> {
        Url::parse(&self.base_url)
            .map_err(|e| DoomsdayError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| DoomsdayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(IpswClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url,
                rate_limiter: RateLimiter::direct(self.rate_limit.quota()),
            }),
        })
    }
}

/// User agent sent by both the catalog client and the download prober
#[must_use]
pub fn default_user_agent() -> String {
    format!("doomsday/{}", env!("CARGO_PKG_VERSION"))
}
