//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use af_core::DEFAULT_TITLE_LENGTH;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Days of history kept by `af merge` unless overridden.
pub const DEFAULT_RETENTION_DAYS: i64 = 90;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the events file (a JSON array of events).
    pub events_path: PathBuf,
    /// Path to the project catalog (`{"projects": [...]}`).
    pub projects_path: PathBuf,
    /// Days of history kept when merging new events.
    pub retention_days: i64,
    /// Maximum title length in rendered feeds.
    pub title_length: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("events_path", &self.events_path)
            .field("projects_path", &self.projects_path)
            .field("retention_days", &self.retention_days)
            .field("title_length", &self.title_length)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.json"),
            projects_path: data_dir.join("projects.json"),
            retention_days: DEFAULT_RETENTION_DAYS,
            title_length: DEFAULT_TITLE_LENGTH,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (AF_*)
        figment = figment.merge(Env::prefixed("AF_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for af.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("af"))
}

/// Returns the platform-specific data directory for af.
///
/// On Linux: `~/.local/share/af`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("af"))
}
