//! HTTP fetch for the seismic feed.
//!
//! One GET against a fully constructed URL, bounded by an explicit
//! deadline, returning the raw body text on a 2xx response. No retries --
//! retry policy belongs to whoever drives the loader. The fetcher holds no
//! state beyond its `reqwest` client, so a single instance can serve any
//! number of sequential cycles.

use std::time::Duration;

use tracing::debug;

use crate::error::FetchError;

/// Issues feed requests over HTTP with a bounded timeout.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Fetcher {
    /// Create a fetcher with the given per-request deadline.
    ///
    /// The deadline covers the whole request: connect, response headers,
    /// and body read.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Fetch the raw response body from `url`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] when the deadline elapses,
    /// - [`FetchError::HttpStatus`] on any non-2xx response,
    /// - [`FetchError::Network`] for transport failures.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, timeout_ms = self.timeout.as_millis(), "issuing feed request");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_request_error)?;
        debug!(url, body_len = body.len(), "feed response received");
        Ok(body)
    }
}

/// Map a `reqwest` error onto the feed's fetch taxonomy.
fn classify_request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}
