use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Outcome of a single GET attempt.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One GET attempt, no retries. Implemented over HTTP by [`HttpFetcher`] and by
/// in-memory stubs in tests.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Response, FetchError>;
}

/// Blocking HTTP client. No custom headers; the client's default timeout applies.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport)?;
        Ok(Response { status, body })
    }
}

/// Fetch a page, retrying once on a non-200 status.
///
/// Returns `Ok(None)` when both attempts fail; the caller skips the URL.
/// Transport errors are not retried.
pub fn fetch_page<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> Result<Option<String>, FetchError> {
    for attempt in 1..=2 {
        let response = fetcher.get(url)?;
        if response.is_ok() {
            info!(url, attempt, status = response.status, "fetched");
            return Ok(Some(response.body));
        }
        warn!(url, attempt, status = response.status, "non-200 response");
    }
    warn!(url, "giving up after retry");
    Ok(None)
}

// ── Tests ──
