//! Download prober: a [`Fetcher`] over reqwest.

use async_trait::async_trait;
use doomsday_core::{DoomsdayError, FetchedResponse, Fetcher, Result, DEFAULT_PROBE_TIMEOUT};
use futures_util::StreamExt;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;

use crate::client::default_user_agent;

/// Issues GET requests against firmware download URLs
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self> {
        HttpFetcherBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::new()
    }

    /// Timeouts become [`DoomsdayError::Timeout`] whether they hit while
    /// waiting for headers or while streaming the body.
    fn map_error(timeout: Option<Duration>, err: &reqwest::Error) -> DoomsdayError {
        if err.is_timeout() {
            DoomsdayError::Timeout(timeout.map_or(0, |t| t.as_secs()))
        } else {
            DoomsdayError::ProbeTransport(err.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_error(self.timeout, &e))?;

        let status = response.status().as_u16();
        debug!(url, status, "probe response");

        // Chunks are pulled lazily; the caller stops after its window.
        let timeout = self.timeout;
        let body = response
            .bytes_stream()
            .map(move |chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| Self::map_error(timeout, &e))
            })
            .boxed();

        Ok(FetchedResponse::new(status, body))
    }
}

/// Builder for configuring an [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcherBuilder {
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcherBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Some(DEFAULT_PROBE_TIMEOUT),
            user_agent: default_user_agent(),
        }
    }

    /// Set the per-request timeout; `None` waits indefinitely
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the fetcher
    pub fn build(self) -> Result<HttpFetcher> {
        let mut builder = HttpClient::builder()
            .user_agent(&self.user_agent)
            .no_gzip();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| DoomsdayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpFetcher {
            http,
            timeout: self.timeout,
        })
    }
}
