//! Error types for the getupdate-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling.

/// Errors that can occur while fetching or parsing a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to the search endpoint failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse the search response or a configured selector.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for getupdate-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
