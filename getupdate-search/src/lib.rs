//! # getupdate-search
//!
//! Keyword search scraping for getupdate.
//!
//! This crate builds a "recent results" search URL from configured keywords,
//! fetches the result page with a bounded fixed-interval retry, and extracts
//! title/link/snippet triples from the HTML using CSS selectors.
//!
//! ## Design
//!
//! - [`query`] turns a [`SearchConfig`] into a URL
//! - [`fetch`] performs the GET through the [`PageSource`] seam
//! - [`extract`] turns markup into an [`Extraction`] with explicit per-block outcomes
//! - Running out of retries degrades to an empty result set instead of failing

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod query;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use extract::{Extraction, ResultSelectors};
pub use fetch::{FetchOutcome, HttpPageSource, PageResponse, PageSource, RetryPolicy};
pub use types::{BlockOutcome, SearchResult, SkipReason};

/// Summary of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRun {
    /// The URL that was requested.
    pub url: String,
    /// Number of GET requests made.
    pub attempts: u32,
    /// Status of the last attempt when every attempt failed.
    pub exhausted_status: Option<u16>,
    /// Extracted results. Empty when the fetch was exhausted.
    pub extraction: Extraction,
}

impl SearchRun {
    /// Whether the run fell back to an empty result set.
    pub fn is_degraded(&self) -> bool {
        self.exhausted_status.is_some()
    }
}

/// Run one search over HTTP using the configured user agent.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] for invalid selectors and
/// [`SearchError::Http`] if the search endpoint cannot be reached at all.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> getupdate_search::Result<()> {
/// let config = getupdate_search::SearchConfig {
///     keywords: vec!["rust".into(), "release".into()],
///     ..Default::default()
/// };
/// let run = getupdate_search::search(&config).await?;
/// for result in &run.extraction.results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(config: &SearchConfig) -> Result<SearchRun> {
    let source = HttpPageSource::new(&config.user_agent)?;
    search_with(&source, config).await
}

/// Run one search against an arbitrary [`PageSource`].
///
/// An exhausted fetch is logged and produces an empty extraction; the body
/// of the last failed response is never parsed.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] for invalid selectors, before any
/// request is made, and the first transport error from `source`.
pub async fn search_with<S: PageSource>(source: &S, config: &SearchConfig) -> Result<SearchRun> {
    let selectors = config.selectors()?;
    let url = query::build_query_url(config);

    let outcome = fetch::fetch_with_retry(source, &url, &config.retry_policy()).await?;
    let attempts = outcome.attempts();

    let (extraction, exhausted_status) = match outcome {
        FetchOutcome::Success { body, .. } => (extract::extract_results(&body, &selectors), None),
        FetchOutcome::Exhausted { last_status, .. } => {
            tracing::warn!(
                attempts,
                status = last_status,
                "search retries exhausted; continuing with an empty result set"
            );
            (Extraction::default(), Some(last_status))
        }
    };

    Ok(SearchRun {
        url,
        attempts,
        exhausted_status,
        extraction,
    })
}
