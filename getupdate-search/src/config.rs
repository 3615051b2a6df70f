//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] is the `[SEARCH]` table of the getupdate config file.
//! The keys the scheduled job depends on (`keywords`, `exclude_keywords`,
//! `lang`, `numbers`, `ua`) are required; the endpoint, selectors and retry
//! knobs fall back to defaults tuned for the Google result page. Values are
//! taken as parsed: a zero `numbers` or an empty `ua` is sent as-is.

use crate::error::SearchError;
use crate::extract::ResultSelectors;
use crate::fetch::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google.co.jp/search";

/// Default container marker, one element per organic result.
pub const DEFAULT_RESULT_SELECTOR: &str = "div.g";

/// Default heading marker inside a result block.
pub const DEFAULT_TITLE_SELECTOR: &str = "h3";

/// Default snippet marker inside a result block.
pub const DEFAULT_SNIPPET_SELECTOR: &str = "span.aCOpRe";

/// Default number of GET attempts before giving up.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;

/// Default fixed delay between attempts, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Configuration for one keyword search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Keywords that must appear, joined with `+` in this order.
    pub keywords: Vec<String>,
    /// Keywords that must not appear.
    pub exclude_keywords: Vec<String>,
    /// Interface language passed as `hl`.
    pub lang: String,
    /// Result count hint passed as `num`. The engine may ignore it.
    pub numbers: u32,
    /// User-Agent header sent with every request.
    #[serde(rename = "ua")]
    pub user_agent: String,
    /// Search endpoint the query string is appended to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// CSS selector matching one element per result block.
    #[serde(default = "default_result_selector")]
    pub result_selector: String,
    /// CSS selector for the heading inside a block.
    #[serde(default = "default_title_selector")]
    pub title_selector: String,
    /// CSS selector for the snippet inside a block.
    #[serde(default = "default_snippet_selector")]
    pub snippet_selector: String,
    /// Maximum number of GET attempts.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts in seconds.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_result_selector() -> String {
    DEFAULT_RESULT_SELECTOR.to_owned()
}

fn default_title_selector() -> String {
    DEFAULT_TITLE_SELECTOR.to_owned()
}

fn default_snippet_selector() -> String {
    DEFAULT_SNIPPET_SELECTOR.to_owned()
}

fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}

fn default_retry_delay_secs() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            lang: "en".to_owned(),
            numbers: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            endpoint: default_endpoint(),
            result_selector: default_result_selector(),
            title_selector: default_title_selector(),
            snippet_selector: default_snippet_selector(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

impl SearchConfig {
    /// Returns the retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }

    /// Compiles the configured selectors.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if any selector is not valid CSS.
    pub fn selectors(&self) -> Result<ResultSelectors, SearchError> {
        ResultSelectors::new(
            &self.result_selector,
            &self.title_selector,
            &self.snippet_selector,
        )
    }
}
