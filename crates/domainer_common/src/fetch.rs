//! Feed download
//!
//! One blocking GET against the bardate feed. No retries.

use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Feed download errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Source of the raw feed text
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Real fetcher using `reqwest::blocking`
pub struct HttpFeedFetcher {
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpFeedFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(format!("domainer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))?;
        debug!("Downloaded {} bytes", body.len());

        Ok(body)
    }
}

/// Fetcher whose HTTP client could not be built; every fetch reports why
pub struct UnavailableFetcher(pub FetchError);

impl FeedFetcher for UnavailableFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(self.0.clone())
    }
}

/// Fake fetcher for testing
pub struct FakeFeedFetcher {
    response: Result<String, FetchError>,
    requested: Mutex<Vec<String>>,
}

impl FakeFeedFetcher {
    /// Always return the given body
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with the given error
    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requested().len()
    }
}

impl FeedFetcher for FakeFeedFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut urls) = self.requested.lock() {
            urls.push(url.to_string());
        }
        self.response.clone()
    }
}
