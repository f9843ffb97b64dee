//! Polling configuration.

use std::time::Duration;

use serde::Deserialize;

/// `[polling]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between reconcile ticks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Watermarks older than this many hours are advanced to now at startup.
    /// Zero disables the guard.
    #[serde(default = "default_max_watermark_age_hours")]
    pub max_watermark_age_hours: u64,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_max_watermark_age_hours() -> u64 {
    24
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_watermark_age_hours: default_max_watermark_age_hours(),
        }
    }
}

impl PollingConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn max_watermark_age(&self) -> Option<chrono::Duration> {
        if self.max_watermark_age_hours == 0 {
            return None;
        }
        i64::try_from(self.max_watermark_age_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
    }
}
