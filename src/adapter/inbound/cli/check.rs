//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::leetcode::LeetCodeCredentials;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Report the effective configuration. Loading already validated it.
pub fn execute_config(path: &Path, config: &Config) -> Result<()> {
    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Database", &config.database);
    output::field("Source", &config.source.api_url);
    output::field("Poll every", format!("{}s", config.polling.interval_secs));
    if config.report.enabled {
        output::field(
            "Report at",
            format!("{} {}", config.report.time, config.report.timezone),
        );
    } else {
        output::field("Report", "disabled");
    }

    if LeetCodeCredentials::from_env().is_some() {
        output::success("LeetCode session credentials detected");
    } else {
        output::note("No LeetCode session credentials (public API only)");
    }

    if config.telegram.enabled {
        let token_present = std::env::var("TELEGRAM_BOT_TOKEN")
            .map(|token| !token.trim().is_empty())
            .unwrap_or(false);
        if !cfg!(feature = "telegram") {
            output::warning("Telegram enabled but this build lacks the `telegram` feature");
        } else if token_present {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but TELEGRAM_BOT_TOKEN is missing");
        }
    } else {
        output::field("Telegram", "disabled");
    }

    Ok(())
}
