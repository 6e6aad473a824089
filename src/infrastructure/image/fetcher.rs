//! HTTP source image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::entities::SourceUrl;
use crate::domain::errors::PipelineError;
use crate::domain::ports::ImageFetcherPort;

/// Configuration for the source image fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            timeout_secs: 30,
        }
    }
}

/// Downloads source images over HTTP(S).
pub struct HttpImageFetcher {
    client: Client,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher").finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a fetcher.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &FetcherConfig) -> Result<Self, PipelineError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate validation is disabled for source image downloads");
        }

        let client = Client::builder()
            .user_agent(concat!("gifr/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| PipelineError::fetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &SourceUrl) -> Result<Bytes, PipelineError> {
        debug!(url = %url, "Downloading source image");

        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Source image request failed");
            if e.is_timeout() {
                PipelineError::fetch("request timed out")
            } else if e.is_connect() {
                PipelineError::fetch(format!("failed to connect: {e}"))
            } else {
                PipelineError::fetch(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Source responded with non-success status");
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::fetch(format!("failed to read body: {e}")))?;

        debug!(url = %url, size = bytes.len(), "Downloaded source image");
        Ok(bytes)
    }
}
