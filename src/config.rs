//! Layered settings.
//!
//! Values come from an optional settings file and `FINDASH_*` environment
//! variables, in that order of precedence (environment wins). Command-line
//! flags are applied on top by the binary.
//!
//! ```toml
//! base_url = "http://localhost:3000/api"
//! timeout_secs = 5
//! refresh_secs = 60
//! log_file = "findash.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable prefix (`FINDASH_BASE_URL`, `FINDASH_TIMEOUT_SECS`, ...).
pub const ENV_PREFIX: &str = "FINDASH";

fn default_timeout_secs() -> u64 {
    10
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// API base URL for the HTTP source.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Directory of dataset files for the file source.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// HTTP client timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Periodic refresh interval in seconds; no automatic refresh when unset.
    #[serde(default)]
    pub refresh_secs: Option<u64>,
    /// Log file for the TUI.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            timeout_secs: default_timeout_secs(),
            refresh_secs: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an optional file plus the given environment source.
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder.add_source(env).build()?.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Refresh interval, ignoring a zero value.
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}
