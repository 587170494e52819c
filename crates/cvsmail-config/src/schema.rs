//! Configuration schema.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where recorded changes are written.
    #[serde(default)]
    pub store: StoreConfig,

    /// Polling behaviour of `cvsmail watch`.
    #[serde(default)]
    pub watch: WatchConfig,

    /// Watched maildirs.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Config {
    /// Checks values that the TOML schema alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on a zero poll interval, an empty source name or prefix,
    /// or two sources sharing a name.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.watch.poll_interval == 0 {
            return Err(ConfigError::Invalid(
                "watch.poll_interval must be at least 1 second".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::Invalid("source name cannot be empty".to_string()));
            }
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source name: {}",
                    source.name
                )));
            }
            if source.prefix.as_deref().is_some_and(str::is_empty) {
                return Err(ConfigError::Invalid(format!(
                    "source {}: prefix cannot be empty, omit it instead",
                    source.name
                )));
            }
        }

        Ok(())
    }

    /// Validates the configuration and requires at least one source.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::validate`] fails or no source is configured.
    pub fn validate_for_run(&self) -> ConfigResult<()> {
        self.validate()?;
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid(
                "no [[sources]] configured".to_string(),
            ));
        }
        Ok(())
    }
}

/// Change store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON-lines output file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("changes.jsonl")
}

/// Watch loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between two scans.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    10
}

/// Notification format of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// FreshCVS (`Modified files:` / `Log message:`).
    FreshCvs,
    /// Syncmail (`Subject: dir file,rev,rev`).
    Syncmail,
    /// Bonsai (`|`-separated control lines).
    Bonsai,
}

impl SourceKind {
    /// Human-readable label used in source descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FreshCvs => "FreshCVS",
            Self::Syncmail => "Syncmail",
            Self::Bonsai => "Bonsai",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FreshCvs => "freshcvs",
            Self::Syncmail => "syncmail",
            Self::Bonsai => "bonsai",
        };
        f.write_str(name)
    }
}

/// One watched maildir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Unique name, recorded with every change from this source.
    pub name: String,

    /// Notification format.
    pub kind: SourceKind,

    /// Maildir root (containing `new/` and `cur/`).
    pub maildir: PathBuf,

    /// Only keep files under this path, with the prefix removed.
    #[serde(default)]
    pub prefix: Option<String>,
}
