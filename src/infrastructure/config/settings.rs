//! Application configuration loading and validation.
//!
//! [`Config`] aggregates every section of `config.toml`. All sections are
//! optional; an empty file yields a working configuration. Secrets are never
//! read from the file: `TELEGRAM_BOT_TOKEN`, `LEETCODE_SESSION` and
//! `LEETCODE_CSRF_TOKEN` come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use solvewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::polling::PollingConfig;
use super::report::ReportConfig;
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::leetcode::LeetCodeConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    ///
    /// Defaults to "solvewatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Submission source (LeetCode GraphQL) settings.
    #[serde(default)]
    pub source: LeetCodeConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

fn default_database_path() -> String {
    "solvewatch.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            source: LeetCodeConfig::default(),
            polling: PollingConfig::default(),
            report: ReportConfig::default(),
            telegram: TelegramAppConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// `SOLVEWATCH_DATABASE` overrides the database path when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(database) = std::env::var("SOLVEWATCH_DATABASE") {
            if !database.trim().is_empty() {
                config.database = database;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        if self.source.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "source.api_url",
            }
            .into());
        }
        let api_url =
            url::Url::parse(&self.source.api_url).map_err(|e| ConfigError::InvalidValue {
                field: "source.api_url",
                reason: e.to_string(),
            })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "source.api_url",
                reason: "must be an http or https URL".to_string(),
            }
            .into());
        }
        if self.source.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.recent_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.polling.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "polling.interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        self.report.at()?;
        self.report.tz()?;
        if self.report.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.chunk_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
