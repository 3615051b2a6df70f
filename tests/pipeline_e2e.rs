//! End-to-end tests for a full getupdate run.
//!
//! The search page is served by a scripted page source or by `wiremock`,
//! reports are written into a temporary directory, and mail goes to a
//! recording mailer. No real network or SMTP relay is involved.

use chrono::{NaiveDate, NaiveDateTime};
use getupdate::{run_at, GetUpdateError, Mailer, OutgoingMail, Settings};
use getupdate_search::{HttpPageSource, PageResponse, PageSource, SearchError};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_RESULTS_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="g">
  <a href="https://alpha.example/post"><h3>Alpha released</h3></a>
  <span class="aCOpRe">Alpha 1.0 is out today.</span>
</div>
<div class="g">
  <a href="https://beta.example/news"><h3>Beta roadmap</h3></a>
  <span class="aCOpRe">What is next for Beta.</span>
</div>
</body>
</html>"#;

/// Serves one fixed response and records every requested URL.
struct StubSource {
    status: u16,
    body: String,
    urls: Mutex<Vec<String>>,
    calls: AtomicU32,
}

impl StubSource {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            urls: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }
}

impl PageSource for StubSource {
    async fn get(&self, url: &str) -> Result<PageResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().expect("lock").push(url.to_string());
        Ok(PageResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> getupdate::Result<()> {
        self.sent.lock().expect("lock").push(mail.clone());
        Ok(())
    }
}

struct FailingMailer;

impl Mailer for FailingMailer {
    async fn send(&self, _mail: &OutgoingMail) -> getupdate::Result<()> {
        Err(GetUpdateError::Mail("connection refused".into()))
    }
}

fn settings_toml(work_path: &Path, hierarchy: bool, send_mail: bool) -> String {
    format!(
        r#"
[SEARCH]
keywords = ["alpha", "beta"]
exclude_keywords = [""]
lang = "en"
numbers = 10
ua = "getupdate-test/1.0"
retry_delay_secs = 0

[PATH]
work_path = {work_path:?}
hierarchy = {hierarchy}
dir_name = "news"

[MAIL]
send_mail = {send_mail}
from = "bot@example.com"
to = "me@example.com"
subject = "getupdate "
"#,
        work_path = work_path.display().to_string(),
    )
}

fn settings(work_path: &Path, hierarchy: bool, send_mail: bool) -> Settings {
    Settings::from_toml_str(&settings_toml(work_path, hierarchy, send_mail)).expect("test settings")
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .expect("date")
        .and_hms_opt(6, 30, 0)
        .expect("time")
}

#[tokio::test]
async fn two_results_end_to_end() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings(root.path(), true, false);
    let source = StubSource::new(200, TWO_RESULTS_HTML);
    let mailer = RecordingMailer::default();

    let summary = run_at(&settings, &source, &mailer, now()).await.expect("run");

    let urls = source.urls.lock().expect("lock");
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("as_q=alpha+beta"));
    assert!(urls[0].contains("as_eq="));
    assert!(urls[0].contains("hl=en&num=10"));

    assert_eq!(
        summary.report,
        root.path().join("2026").join("10").join("news").join("2026-10-17-06.html")
    );
    assert_eq!(summary.results, 2);
    assert_eq!(summary.attempts, 1);
    assert!(!summary.degraded);
    assert!(!summary.mailed);
    assert!(mailer.sent.lock().expect("lock").is_empty());

    let html = std::fs::read_to_string(&summary.report).expect("report");
    assert_eq!(html.matches("<hr>").count(), 2);
    let alpha = html
        .find("<h3>Alpha released</h3><a href=\"https://alpha.example/post\">https://alpha.example/post</a>")
        .expect("alpha fragment");
    let beta = html
        .find("<h3>Beta roadmap</h3><a href=\"https://beta.example/news\">https://beta.example/news</a>")
        .expect("beta fragment");
    assert!(alpha < beta);
    assert!(html.contains("<p>Alpha 1.0 is out today.</p>"));
    assert!(html.contains("<p>What is next for Beta.</p>"));
    assert!(html.contains(r#"href="../../../getupdate.css""#));
}

#[tokio::test]
async fn mailed_body_equals_report_file() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings(root.path(), false, true);
    let source = StubSource::new(200, TWO_RESULTS_HTML);
    let mailer = RecordingMailer::default();

    let summary = run_at(&settings, &source, &mailer, now()).await.expect("run");
    assert!(summary.mailed);

    let sent = mailer.sent.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    let on_disk = std::fs::read(&summary.report).expect("report");
    assert_eq!(sent[0].html_body.as_bytes(), on_disk.as_slice());
    assert_eq!(sent[0].subject, "getupdate 2026-10-17 06:30:00");
}

#[tokio::test]
async fn mail_failure_is_fatal_but_report_survives() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings(root.path(), false, true);
    let source = StubSource::new(200, TWO_RESULTS_HTML);

    let err = run_at(&settings, &source, &FailingMailer, now())
        .await
        .expect_err("mail failure should abort the run");
    assert!(matches!(err, GetUpdateError::Mail(_)));

    let report = root.path().join("news").join("2026-10-17-06.html");
    let html = std::fs::read_to_string(report).expect("report written before mail");
    assert_eq!(html.matches("<hr>").count(), 2);
}

#[tokio::test]
async fn exhausted_fetch_writes_empty_report() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings(root.path(), true, false);
    let source = StubSource::new(503, TWO_RESULTS_HTML);
    let mailer = RecordingMailer::default();

    let summary = run_at(&settings, &source, &mailer, now()).await.expect("run");
    assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    assert!(summary.degraded);
    assert_eq!(summary.results, 0);

    let html = std::fs::read_to_string(&summary.report).expect("report");
    assert_eq!(html.matches("<hr>").count(), 0);
    assert!(html.contains("Top Dir."));
}

#[tokio::test]
async fn rerun_in_same_hour_overwrites_report() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings(root.path(), true, false);
    let mailer = RecordingMailer::default();

    let first = run_at(&settings, &StubSource::new(200, TWO_RESULTS_HTML), &mailer, now())
        .await
        .expect("first run");
    let second = run_at(&settings, &StubSource::new(200, "<html></html>"), &mailer, now())
        .await
        .expect("second run");

    assert_eq!(first.report, second.report);
    let html = std::fs::read_to_string(&second.report).expect("report");
    assert_eq!(html.matches("<hr>").count(), 0);
}

#[tokio::test]
async fn parsed_settings_run_without_further_checks() {
    let root = tempfile::tempdir().expect("tempdir");
    let toml = settings_toml(root.path(), true, false)
        .replace("numbers = 10", "numbers = 0")
        .replace("ua = \"getupdate-test/1.0\"", "ua = \"\"");
    let settings = Settings::from_toml_str(&toml).expect("config parses");
    assert_eq!(settings.search.numbers, 0);
    assert!(settings.search.user_agent.is_empty());
    let source = StubSource::new(200, TWO_RESULTS_HTML);

    let summary = run_at(&settings, &source, &RecordingMailer::default(), now())
        .await
        .expect("parsed config runs");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(summary.results, 2);
    assert!(summary.url.contains("num=0"));
}

#[tokio::test]
async fn invalid_selector_aborts_before_fetch() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut settings = settings(root.path(), true, false);
    settings.search.title_selector = "h3[".into();
    let source = StubSource::new(200, TWO_RESULTS_HTML);

    let err = run_at(&settings, &source, &RecordingMailer::default(), now())
        .await
        .expect_err("invalid selector");
    assert!(matches!(err, GetUpdateError::Search(_)));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn http_source_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TWO_RESULTS_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let root = tempfile::tempdir().expect("tempdir");
    let mut settings = settings(root.path(), false, false);
    settings.search.endpoint = format!("{}/search", server.uri());
    let source = HttpPageSource::new(&settings.search.user_agent).expect("client");

    let summary = run_at(&settings, &source, &RecordingMailer::default(), now())
        .await
        .expect("run");
    assert_eq!(summary.results, 2);
    assert!(summary.url.starts_with(&server.uri()));
    assert!(summary.report.exists());
}
