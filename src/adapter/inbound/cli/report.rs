//! Handler for `report`.

use chrono::NaiveDate;

use crate::adapter::inbound::cli::output;
use crate::application::report::render_report;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

/// Build the leaderboard for `date` (today in the report timezone when
/// omitted) and print it.
pub async fn execute(config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let services = Services::for_command(config)?;
    let aggregator = &services.aggregator;
    let date = date.unwrap_or_else(|| {
        services
            .clock
            .now()
            .with_timezone(&aggregator.timezone())
            .date_naive()
    });

    let report = aggregator.build_report(date).await?;
    if report.is_empty() {
        output::section("Daily Report");
        output::note(&format!("No solves recorded on {date}"));
        return Ok(());
    }

    let notification = render_report(&report, aggregator.chunk_size());
    for block in &notification.blocks {
        output::section(&block.title);
        if let Some(description) = &block.description {
            output::note(description);
        }
        for field in &block.fields {
            output::section(&format!("  {}", field.name));
            for line in field.value.lines() {
                output::note(line);
            }
        }
    }
    Ok(())
}
