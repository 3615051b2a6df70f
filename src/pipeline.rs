//! One scheduled run: search → report → notify.
//!
//! Every resource (HTTP client, report file, SMTP transport) is created by
//! the step that needs it and dropped before the next step starts, so a
//! failure in notification leaves a complete report behind.

use crate::config::Settings;
use crate::error::Result;
use crate::notify::{self, Mailer, SmtpRelay};
use crate::report;
use chrono::{Local, NaiveDateTime};
use getupdate_search::{HttpPageSource, PageSource};
use std::path::PathBuf;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Search URL that was requested.
    pub url: String,
    /// Number of GET requests made.
    pub attempts: u32,
    /// Whether every attempt failed and the report is empty.
    pub degraded: bool,
    /// Number of results written.
    pub results: usize,
    /// Number of result blocks skipped as incomplete.
    pub skipped: usize,
    /// Path of the written report.
    pub report: PathBuf,
    /// Whether the report was mailed.
    pub mailed: bool,
}

/// Run the pipeline over HTTP and SMTP at the current local time.
///
/// # Errors
///
/// Returns the first fatal error: an invalid result selector, an
/// unreachable search endpoint, an unwritable report, or a mail failure.
pub async fn run(settings: &Settings) -> Result<RunSummary> {
    let source = HttpPageSource::new(&settings.search.user_agent)?;
    let mailer = SmtpRelay::from_settings(&settings.mail);
    run_at(settings, &source, &mailer, Local::now().naive_local()).await
}

/// Run the pipeline with explicit collaborators and clock.
///
/// # Errors
///
/// Same as [`run`].
pub async fn run_at<S: PageSource, M: Mailer>(
    settings: &Settings,
    source: &S,
    mailer: &M,
    now: NaiveDateTime,
) -> Result<RunSummary> {
    let search = getupdate_search::search_with(source, &settings.search).await?;
    tracing::info!(
        attempts = search.attempts,
        results = search.extraction.results.len(),
        skipped = search.extraction.skipped.len(),
        "search finished"
    );

    let report = report::write_report(
        &settings.path,
        &now,
        &settings.search.lang,
        &search.extraction.results,
    )?;

    let mailed = notify::notify(&settings.mail, &report, &now, mailer).await?;

    Ok(RunSummary {
        degraded: search.is_degraded(),
        results: search.extraction.results.len(),
        skipped: search.extraction.skipped.len(),
        url: search.url,
        attempts: search.attempts,
        report,
        mailed,
    })
}
