//! Handler for the `run` command.

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

/// Print the startup summary and run until interrupted.
pub async fn execute(config: Config) -> Result<()> {
    output::section(concat!("solvewatch ", env!("CARGO_PKG_VERSION")));
    output::field("Database", &config.database);
    output::field("Poll every", format!("{}s", config.polling.interval_secs));
    if config.report.enabled {
        output::field(
            "Report at",
            format!("{} {}", config.report.time, config.report.timezone),
        );
    }
    output::field(
        "Telegram",
        if config.telegram.enabled {
            "enabled"
        } else {
            "disabled"
        },
    );

    runtime::run(config).await
}
