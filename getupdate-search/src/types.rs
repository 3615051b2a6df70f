//! Core types for extracted search results.

use std::fmt;

/// A single search result extracted from a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Text of the result heading.
    pub title: String,
    /// Target of the first hyperlink in the result block.
    pub url: String,
    /// Text of the snippet element.
    pub snippet: String,
}

/// Why a result block was left out of the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No heading element.
    MissingTitle,
    /// No hyperlink with an `href`.
    MissingLink,
    /// No snippet element.
    MissingSnippet,
}

impl SkipReason {
    /// Returns a short, stable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingTitle => "missing title",
            Self::MissingLink => "missing link",
            Self::MissingSnippet => "missing snippet",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of extracting a single result block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// All three fields were present.
    Extracted(SearchResult),
    /// The block was skipped.
    Skipped(SkipReason),
}

impl BlockOutcome {
    /// Returns the extracted result, if any.
    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            Self::Extracted(result) => Some(result),
            Self::Skipped(_) => None,
        }
    }
}
