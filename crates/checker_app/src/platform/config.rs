//! Optional RON configuration for the terminal app.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```ron
//! (
//!     endpoint: "http://127.0.0.1:8000/check-url",
//!     request_timeout_ms: 10000,
//!     log_destination: Both,
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use checker_engine::{CheckSettings, DEFAULT_ENDPOINT};
use checker_logging::{LevelFilter, LogDestination};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read from the working directory when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "checker.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    pub log_destination: LogTarget,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = CheckSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: settings.connect_timeout.as_millis() as u64,
            request_timeout_ms: settings.request_timeout.as_millis() as u64,
            max_bytes: settings.max_bytes,
            // The terminal is the UI, so keep log lines out of it by default.
            log_destination: LogTarget::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn check_settings(&self) -> CheckSettings {
        CheckSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => read(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read(default_path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.level_filter()?;
    Ok(config)
}
