//! Fetcher module for downloading javadoc index documents

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::doc_engine::types::{FetchError, FetchResult, HttpResponse};

/// Minimal HTTP GET seam used by the cache.
///
/// Any HTTP status is a successful transport-level response; only failures
/// that produce no status at all are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse>;
}

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    /// `None` keeps the transport default (no overall request timeout)
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("javadoc-migrate/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

/// reqwest-backed [`HttpTransport`]
pub struct Fetcher {
    http_client: Client,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").finish()
    }
}

impl Fetcher {
    /// Create a new fetcher instance
    pub fn new() -> FetchResult<Self> {
        Self::with_config(FetcherConfig::default())
    }

    /// Create a new fetcher with custom configuration
    pub fn with_config(config: FetcherConfig) -> FetchResult<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent).gzip(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| FetchError::Network {
            url: String::new(),
            message: format!("failed to create HTTP client: {e}"),
        })?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for Fetcher {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http_client.get(url).send().await.map_err(network)?;
        let status = response.status().as_u16();
        debug!("GET {} -> {}", url, status);
        let body = response.text().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }
}
