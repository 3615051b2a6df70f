//! Scheduled search binary.
//!
//! Runs the pipeline once and exits. Intended to be started by cron or a
//! systemd timer; invocations must not overlap. Diagnostics go to stderr
//! and nothing is printed on success.

use clap::Parser;
use getupdate::Settings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Search for recent results and write them to an HTML report.
#[derive(Parser)]
#[command(name = "getupdate", version, about)]
struct Cli {
    /// Path to TOML configuration file (default: ./getupdate.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("getupdate=info,getupdate_search=info")
        }))
        .init();

    let cli = Cli::parse();
    let config_path = Settings::resolve_path(cli.config.as_deref());
    let settings = Settings::from_file(&config_path)?;

    let summary = getupdate::run(&settings).await.map_err(|e| {
        tracing::error!(error = %e, "run failed");
        anyhow::anyhow!("getupdate failed: {e}")
    })?;

    tracing::info!(
        report = %summary.report.display(),
        results = summary.results,
        degraded = summary.degraded,
        mailed = summary.mailed,
        "run complete"
    );
    Ok(())
}
