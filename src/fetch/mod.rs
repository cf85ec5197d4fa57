//! The fetch capability used by every loader.
//!
//! Loaders only ever see the [`Fetcher`] trait: issue a GET for an API path
//! and hand back the status and body. Whether a status counts as a failure is
//! the loader's call, not the fetcher's.

pub mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure of a single GET.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Cannot connect to API at {url}")]
    Connect { url: String },

    #[error("Failed to send request: {0}")]
    Request(String),

    #[error("Failed to parse response body: {0}")]
    Decode(String),
}

/// Status and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Issue an HTTP GET for an API path such as `/api/projects/42`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, path: &str) -> Result<FetchResponse, FetchError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_covers_2xx_only() {
        assert!(FetchResponse::new(200, "").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(199, "").is_success());
        assert!(!FetchResponse::new(301, "").is_success());
        assert!(!FetchResponse::new(404, "").is_success());
        assert!(!FetchResponse::new(503, "").is_success());
    }

    #[test]
    fn test_json_parses_body() {
        let response = FetchResponse::new(200, r#"{"ID": 3, "name": "staging"}"#);
        let value = response.json().unwrap();
        assert_eq!(value["ID"], 3);
        assert_eq!(value["name"], "staging");
    }

    #[test]
    fn test_json_reports_decode_error() {
        let response = FetchResponse::new(200, "<html>oops</html>");
        assert!(matches!(response.json(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Timeout {
            url: "http://localhost:8080/api/projects/1".to_string(),
            seconds: 5,
        };
        assert_eq!(
            err.to_string(),
            "Request to http://localhost:8080/api/projects/1 timed out after 5s"
        );

        let err = FetchError::Connect {
            url: "http://localhost:8080".to_string(),
        };
        assert!(err.to_string().contains("Cannot connect"));
    }

    #[test]
    fn test_scripted_fetcher_records_calls() {
        let fetcher = testing::ScriptedFetcher::new().respond("/a", 200, "[]");

        let first = tokio_test::block_on(fetcher.get("/a")).unwrap();
        let second = tokio_test::block_on(fetcher.get("/b")).unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 404);
        assert_eq!(fetcher.calls(), vec!["/a", "/b"]);
    }
}
