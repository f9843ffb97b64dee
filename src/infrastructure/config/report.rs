//! Daily report configuration.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ConfigError;

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Local time of day, `HH:MM`.
    #[serde(default = "default_time")]
    pub time: String,
    /// IANA timezone name.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Maximum characters per list field.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

const fn default_enabled() -> bool {
    true
}

fn default_time() -> String {
    "23:55".to_string()
}

fn default_timezone() -> String {
    "Europe/Warsaw".to_string()
}

const fn default_chunk_size() -> usize {
    1024
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            time: default_time(),
            timezone: default_timezone(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ReportConfig {
    /// Parsed report time.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] unless `time` is `HH:MM`.
    pub fn at(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.time.trim(), "%H:%M").map_err(|e| {
            ConfigError::InvalidValue {
                field: "report.time",
                reason: format!("expected HH:MM ({e})"),
            }
        })
    }

    /// Parsed report timezone.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for unknown zone names.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "report.timezone",
                reason: e.to_string(),
            })
    }
}
