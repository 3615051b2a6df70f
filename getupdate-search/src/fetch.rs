//! Fetching the result page with a bounded, fixed-interval retry.
//!
//! A fetch makes at most [`RetryPolicy::max_attempts`] GET requests. A
//! `200 OK` ends the loop; any other status waits [`RetryPolicy::delay`]
//! and tries again. Running out of attempts is not an error: it produces
//! [`FetchOutcome::Exhausted`] so the caller decides how to degrade.
//! Transport failures are returned immediately and are not retried.

use crate::config::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use crate::error::SearchError;
use crate::http;
use std::future::Future;
use std::time::Duration;

/// Status and body of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl PageResponse {
    /// Whether the response counts as a successful attempt.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Something that can GET a URL.
///
/// The production implementation is [`HttpPageSource`]; tests substitute
/// scripted sources to observe attempt counts.
pub trait PageSource: Send + Sync {
    /// Perform one GET request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] when no response could be obtained at
    /// all. A non-success status is a normal [`PageResponse`].
    fn get(&self, url: &str) -> impl Future<Output = Result<PageResponse, SearchError>> + Send;
}

/// [`PageSource`] backed by a `reqwest` client.
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Create a source that sends `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(user_agent)?,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn get(&self, url: &str) -> Result<PageResponse, SearchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("search request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("search response read failed: {e}")))?;

        tracing::trace!(status, bytes = body.len(), "search response received");
        Ok(PageResponse { status, body })
    }
}

/// How many times to try, and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of GET attempts. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Fixed wait after a failed attempt when another attempt follows.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Result of a fetch with retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// An attempt returned `200 OK`.
    Success {
        /// Body of the successful response.
        body: String,
        /// Number of attempts made, including the successful one.
        attempts: u32,
    },
    /// Every attempt returned a non-success status.
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Status of the last attempt.
        last_status: u16,
        /// Body of the last attempt.
        body: String,
    },
}

impl FetchOutcome {
    /// Number of GET requests that were made.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Whether an attempt succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// GET `url` from `source`, retrying non-success statuses per `policy`.
///
/// # Errors
///
/// Propagates the first transport error from `source` without retrying.
pub async fn fetch_with_retry<S: PageSource>(
    source: &S,
    url: &str,
    policy: &RetryPolicy,
) -> Result<FetchOutcome, SearchError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = source.get(url).await?;

        if response.is_ok() {
            tracing::debug!(attempt, "search page fetched");
            return Ok(FetchOutcome::Success {
                body: response.body,
                attempts: attempt,
            });
        }

        tracing::warn!(
            attempt,
            max_attempts,
            status = response.status,
            "search request returned non-success status"
        );

        if attempt >= max_attempts {
            return Ok(FetchOutcome::Exhausted {
                attempts: attempt,
                last_status: response.status,
                body: response.body,
            });
        }

        tokio::time::sleep(policy.delay).await;
    }
}
