//! reqwest-backed fetcher rooted at the API base URL.

use super::{FetchError, FetchResponse, Fetcher};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fetcher that talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher for `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let url = self.url_for(path);

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.clone(),
                        seconds: self.timeout_seconds,
                    }
                } else if e.is_connect() {
                    FetchError::Connect {
                        url: self.base_url.clone(),
                    }
                } else {
                    FetchError::Request(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        debug!("GET {} -> {}", url, status);

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(FetchResponse::new(status, body))
    }
}
