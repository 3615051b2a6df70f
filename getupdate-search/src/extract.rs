//! Result extraction from search result pages.
//!
//! Blocks are located with a configurable container selector. Each block
//! must contain a heading, a hyperlink with an `href` and a snippet element;
//! a block missing any of them is reported as [`BlockOutcome::Skipped`] and
//! extraction carries on with the next block. Text is kept as the markup
//! has it, whitespace and all, and an empty element still counts as present. The selectors are coupled to the provider's markup, so a
//! markup change shows up as fewer (or zero) results rather than an error.

use crate::error::SearchError;
use crate::types::{BlockOutcome, SearchResult, SkipReason};
use scraper::{ElementRef, Html, Selector};

/// Compiled CSS selectors for one result page layout.
#[derive(Debug, Clone)]
pub struct ResultSelectors {
    result: Selector,
    title: Selector,
    link: Selector,
    snippet: Selector,
}

impl ResultSelectors {
    /// Compile the block, title and snippet selectors.
    ///
    /// The link is always the first `a` element inside the block.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if any selector is not valid CSS.
    pub fn new(result: &str, title: &str, snippet: &str) -> Result<Self, SearchError> {
        Ok(Self {
            result: Selector::parse(result)
                .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?,
            title: Selector::parse(title)
                .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?,
            link: Selector::parse("a")
                .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?,
            snippet: Selector::parse(snippet)
                .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?,
        })
    }
}

/// Results of extracting one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted results in document order.
    pub results: Vec<SearchResult>,
    /// Reasons for each skipped block, in document order.
    pub skipped: Vec<SkipReason>,
}

impl Extraction {
    /// Number of blocks the container selector matched.
    pub fn block_count(&self) -> usize {
        self.results.len() + self.skipped.len()
    }
}

impl FromIterator<BlockOutcome> for Extraction {
    fn from_iter<I: IntoIterator<Item = BlockOutcome>>(iter: I) -> Self {
        let mut extraction = Self::default();
        for outcome in iter {
            match outcome {
                BlockOutcome::Extracted(result) => extraction.results.push(result),
                BlockOutcome::Skipped(reason) => extraction.skipped.push(reason),
            }
        }
        extraction
    }
}

/// Return one [`BlockOutcome`] per matched block, in document order.
pub fn extract_blocks(html: &str, selectors: &ResultSelectors) -> Vec<BlockOutcome> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.result)
        .map(|block| extract_block(block, selectors))
        .collect()
}

/// Extract all complete results from `html`.
pub fn extract_results(html: &str, selectors: &ResultSelectors) -> Extraction {
    let extraction: Extraction = extract_blocks(html, selectors).into_iter().collect();
    tracing::debug!(
        blocks = extraction.block_count(),
        results = extraction.results.len(),
        skipped = extraction.skipped.len(),
        "search results extracted"
    );
    extraction
}

fn extract_block(block: ElementRef<'_>, selectors: &ResultSelectors) -> BlockOutcome {
    let title = match first_text(block, &selectors.title) {
        Some(t) => t,
        None => return BlockOutcome::Skipped(SkipReason::MissingTitle),
    };

    let url = match block
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => href.to_string(),
        None => return BlockOutcome::Skipped(SkipReason::MissingLink),
    };

    let snippet = match first_text(block, &selectors.snippet) {
        Some(s) => s,
        None => return BlockOutcome::Skipped(SkipReason::MissingSnippet),
    };

    BlockOutcome::Extracted(SearchResult {
        title,
        url,
        snippet,
    })
}

/// Text of the first element matching `selector`, if there is one.
fn first_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|element| element.text().collect())
}
