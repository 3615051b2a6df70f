//! getupdate: scheduled keyword search reports.
//!
//! One invocation runs a linear pipeline:
//! Config → Query → Fetch → Extract → Report → Mail
//!
//! # Architecture
//!
//! - **Config**: TOML settings with `[SEARCH]`, `[PATH]` and `[MAIL]` tables
//! - **Search**: query building, bounded-retry fetch and extraction live in
//!   the `getupdate-search` crate
//! - **Report**: a static HTML page under an hour-stamped path
//! - **Mail**: the page is optionally sent through a local SMTP relay

pub mod config;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod report;

pub use config::Settings;
pub use error::{GetUpdateError, Result};
pub use notify::{Mailer, OutgoingMail, SmtpRelay};
pub use pipeline::{run, run_at, RunSummary};
