//! Startup settings
//!
//! Command-line flags, the YAML config document and environment overrides.

use anyhow::Context;
use clap::Parser;
use notify::NotifyConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-request wall-clock limit applied at the HTTP layer
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Notification relay server
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to config file
    #[arg(long, default_value = "notify-config.yaml")]
    pub config: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:4000")]
    pub addr: SocketAddr,
}

/// Raw values from the config document
#[derive(Debug, Default, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub timeoff: Option<String>,
}

impl FileSettings {
    /// Read and parse the config document. A missing file is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Let `NOTIFY_USERNAME`, `NOTIFY_PASSWORD` and `NOTIFY_TIMEOFF` override
    /// the document's values.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup("NOTIFY_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("NOTIFY_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(timeoff) = lookup("NOTIFY_TIMEOFF") {
            self.timeoff = Some(timeoff);
        }
        self
    }

    pub fn into_config(self) -> Result<NotifyConfig, notify::ConfigError> {
        NotifyConfig::from_raw(
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
            self.timeoff.as_deref().unwrap_or_default(),
        )
    }
}

/// Resolve the full relay configuration from the config file and environment
pub fn load_config(path: &Path) -> anyhow::Result<NotifyConfig> {
    let settings = FileSettings::load(path)?.with_overrides(|name| std::env::var(name).ok());
    Ok(settings.into_config()?)
}
