//! Error types for the getupdate run.

use getupdate_search::SearchError;

/// Top-level error type for one scheduled run.
#[derive(Debug, thiserror::Error)]
pub enum GetUpdateError {
    /// Config file missing, unreadable, malformed, or missing a key.
    #[error("config error: {0}")]
    Config(String),

    /// Search could not be built, fetched or parsed.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Report could not be written.
    #[error("report error: {0}")]
    Report(String),

    /// Mail relay unreachable or message rejected.
    #[error("mail error: {0}")]
    Mail(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, GetUpdateError>;
