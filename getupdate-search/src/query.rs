//! Search URL construction.
//!
//! The query string restricts results to the last day (`as_qdr=d`) and to
//! matches in the document body (`as_occt=body`). Keywords are inserted as
//! configured, joined with `+`.

use crate::config::SearchConfig;

/// Freshness restriction: results from the last day.
const FRESHNESS_PARAM: &str = "as_qdr=d";

/// Match scope restriction: keywords must occur in the page body.
const SCOPE_PARAM: &str = "as_occt=body";

/// Build the full search URL for `config`.
///
/// Parameter order is `hl`, `num`, `as_qdr`, `as_occt`, `as_q`, `as_eq`.
pub fn build_query_url(config: &SearchConfig) -> String {
    let url = format!(
        "{endpoint}?hl={lang}&num={num}&{FRESHNESS_PARAM}&{SCOPE_PARAM}&as_q={include}&as_eq={exclude}",
        endpoint = config.endpoint,
        lang = config.lang,
        num = config.numbers,
        include = join_keywords(&config.keywords),
        exclude = join_keywords(&config.exclude_keywords),
    );
    tracing::trace!(url = %url, "search URL built");
    url
}

/// Join non-empty keywords with `+`, preserving order.
///
/// Empty entries are dropped without leaving a doubled, leading or trailing
/// separator.
pub fn join_keywords(keywords: &[String]) -> String {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("+")
}
