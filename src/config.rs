//! Configuration types for the scheduled search run.
//!
//! The config file is TOML with three required tables:
//!
//! ```toml
//! [SEARCH]
//! keywords = ["rust", "release"]
//! exclude_keywords = [""]
//! lang = "en"
//! numbers = 10
//! ua = "Mozilla/5.0 ..."
//!
//! [PATH]
//! work_path = "/var/www/getupdate"
//! hierarchy = true
//! dir_name = "rust"
//!
//! [MAIL]
//! send_mail = false
//! from = "getupdate@example.com"
//! to = "me@example.com"
//! subject = "getupdate: "
//! ```

use crate::error::{GetUpdateError, Result};
use getupdate_search::SearchConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "./getupdate.toml";

/// Default SMTP relay host.
pub const DEFAULT_RELAY_HOST: &str = "localhost";

/// Default SMTP relay port.
pub const DEFAULT_RELAY_PORT: u16 = 25;

/// Top-level configuration for one run. Every table is required.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Keyword search settings.
    #[serde(rename = "SEARCH")]
    pub search: SearchConfig,
    /// Report location settings.
    #[serde(rename = "PATH")]
    pub path: PathSettings,
    /// Mail notification settings.
    #[serde(rename = "MAIL")]
    pub mail: MailSettings,
}

/// Where reports are written.
#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    /// Root directory of the report tree.
    pub work_path: PathBuf,
    /// Insert `<YYYY>/<MM>` between `work_path` and `dir_name`.
    pub hierarchy: bool,
    /// Directory holding this search's reports.
    pub dir_name: String,
}

/// Mail notification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// Whether to mail the report at all.
    pub send_mail: bool,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject prefix; the run timestamp is appended.
    pub subject: String,
    /// SMTP relay host.
    #[serde(default = "default_relay_host")]
    pub relay_host: String,
    /// SMTP relay port.
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,
}

fn default_relay_host() -> String {
    DEFAULT_RELAY_HOST.to_owned()
}

fn default_relay_port() -> u16 {
    DEFAULT_RELAY_PORT
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GetUpdateError::Config`] if the file cannot be read, is not
    /// valid TOML, or lacks a required table or key.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GetUpdateError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GetUpdateError::Config`] on malformed TOML or missing keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GetUpdateError::Config(e.to_string()))
    }

    /// Returns the config path to use: `explicit` if given, otherwise
    /// [`DEFAULT_CONFIG_FILE`] relative to the working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf)
    }
}
