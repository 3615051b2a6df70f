//! HTTP client for search page requests.
//!
//! Provides a configured [`reqwest::Client`] carrying the configured
//! User-Agent and transparent brotli/gzip decompression.

use crate::error::SearchError;

/// Maximum number of redirects followed for one request.
const MAX_REDIRECTS: usize = 10;

/// Build a [`reqwest::Client`] that sends `user_agent` with every request.
///
/// No request timeout is set beyond the client defaults.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
