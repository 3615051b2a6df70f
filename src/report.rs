//! Static HTML report rendering.
//!
//! One report per run, at
//! `<work_path>[/<YYYY>/<MM>]/<dir_name>/<YYYY-MM-DD-HH>.html`. The
//! stylesheet and "Top Dir." links climb back to `work_path`, so their
//! depth follows the configured layout.

use crate::config::PathSettings;
use crate::error::{GetUpdateError, Result};
use chrono::NaiveDateTime;
use getupdate_search::SearchResult;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Stylesheet expected at the top of the report tree.
pub const STYLESHEET_NAME: &str = "getupdate.css";

/// Directory that holds reports for `now`.
pub fn report_dir(settings: &PathSettings, now: &NaiveDateTime) -> PathBuf {
    let mut dir = settings.work_path.clone();
    if settings.hierarchy {
        dir.push(now.format("%Y").to_string());
        dir.push(now.format("%m").to_string());
    }
    dir.push(&settings.dir_name);
    dir
}

/// File name for `now`, hour granularity.
pub fn report_file_name(now: &NaiveDateTime) -> String {
    format!("{}.html", now.format("%Y-%m-%d-%H"))
}

/// Full report path for `now`. Runs within the same hour share a path.
pub fn report_path(settings: &PathSettings, now: &NaiveDateTime) -> PathBuf {
    report_dir(settings, now).join(report_file_name(now))
}

/// Number of directories between `work_path` and the report file.
pub fn report_depth(settings: &PathSettings) -> usize {
    if settings.hierarchy {
        3
    } else {
        1
    }
}

/// Render the whole report document.
///
/// `depth` is the value of [`report_depth`] for the layout the document is
/// written into.
pub fn render_report(results: &[SearchResult], lang: &str, depth: usize) -> String {
    let top = "../".repeat(depth);
    let mut html = String::new();
    push_header(&mut html, lang, &top);
    for result in results {
        push_fragment(&mut html, result);
    }
    push_footer(&mut html, &top);
    html
}

/// Render and write the report for `now`, creating directories as needed.
///
/// Returns the path written. An existing report for the same hour is
/// overwritten.
///
/// # Errors
///
/// Returns [`GetUpdateError::Report`] if the directory or file cannot be
/// written.
pub fn write_report(
    settings: &PathSettings,
    now: &NaiveDateTime,
    lang: &str,
    results: &[SearchResult],
) -> Result<PathBuf> {
    let dir = report_dir(settings, now);
    std::fs::create_dir_all(&dir).map_err(|e| {
        GetUpdateError::Report(format!("cannot create {}: {e}", dir.display()))
    })?;

    let path = dir.join(report_file_name(now));
    let html = render_report(results, lang, report_depth(settings));
    write_file(&path, &html)?;

    tracing::info!(path = %path.display(), results = results.len(), "report written");
    Ok(path)
}

fn write_file(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)
        .map_err(|e| GetUpdateError::Report(format!("cannot write {}: {e}", path.display())))
}

fn push_navigation(html: &mut String, top: &str) {
    let _ = write!(
        html,
        r#"  <div class="index">
    <p>
      <a href="./"> current Dir. </a>
       ...
      <a href="../"> parent Dir. </a>
       ...
      <a href="{top}"> Top Dir. </a>
    </p>
  </div>
"#
    );
}

fn push_header(html: &mut String, lang: &str, top: &str) {
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="{lang}">
  <head>
    <meta charset="UTF-8">
    <link rel="stylesheet" type="text/css" href="{top}{STYLESHEET_NAME}">
  </head>
  <body>
"#,
        lang = html_escape(lang),
    );
    push_navigation(html, top);
}

fn push_fragment(html: &mut String, result: &SearchResult) {
    let url = html_escape(&result.url);
    let _ = write!(
        html,
        "<div class=\"article\"><p><h3>{title}</h3><a href=\"{url}\">{url}</a></p>\n<p>{snippet}</p></div>\n<hr>\n",
        title = html_escape(&result.title),
        snippet = html_escape(&result.snippet),
    );
}

fn push_footer(html: &mut String, top: &str) {
    push_navigation(html, top);
    html.push_str("  </body>\n</html>\n");
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
