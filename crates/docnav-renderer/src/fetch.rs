//! Remote markdown loading.

use std::time::Duration;

use ureq::Agent;

/// Default timeout for remote markdown requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error returned when remote content can't be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request failed before a response arrived.
    #[error("Request to {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The server answered with an error status.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body couldn't be read as text.
    #[error("Failed to read response from {url}: {message}")]
    Body {
        /// Requested URL.
        url: String,
        /// Read error description.
        message: String,
    },
}

/// Source of remote markdown.
pub trait ContentFetcher: Send + Sync {
    /// Fetch the text at `url`.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`ContentFetcher`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.agent.get(url).call().map_err(|e| FetchError::Request {
            url: url.to_owned(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let mut body = response.into_body();
        body.read_to_string().map_err(|e| FetchError::Body {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}
