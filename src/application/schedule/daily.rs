//! Once-a-day report trigger.

use std::sync::Arc;

use chrono::NaiveTime;
use tokio::sync::watch;
use tracing::{error, info};

use super::ScheduleHandle;
use crate::application::report::{next_daily_run, report_window, DailyAggregator};
use crate::port::outbound::clock::Clock;

/// Fires the [`DailyAggregator`] at a fixed local time every day.
pub struct DailyReportScheduler {
    aggregator: Arc<DailyAggregator>,
    clock: Arc<dyn Clock>,
    at: NaiveTime,
}

impl DailyReportScheduler {
    /// Each run reports the solves since the previous day's slot, so nothing
    /// recorded between two runs is missed whatever `at` is.
    pub fn new(aggregator: Arc<DailyAggregator>, clock: Arc<dyn Clock>, at: NaiveTime) -> Self {
        Self {
            aggregator,
            clock,
            at,
        }
    }

    /// Spawn the scheduling loop. If today's slot has already passed, the
    /// first run is tomorrow.
    pub fn start(self: Arc<Self>) -> ScheduleHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let tz = self.aggregator.timezone();

        let task = tokio::spawn(async move {
            let mut not_before = self.clock.now();
            loop {
                let next = next_daily_run(not_before, self.at, tz);
                let wait = (next - self.clock.now()).to_std().unwrap_or_default();
                info!(next_run = %next.with_timezone(&tz), "Daily report scheduled");

                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    () = tokio::time::sleep(wait) => {
                        let (date, start, end) = report_window(next, self.at, tz);
                        if let Err(err) = self.aggregator.run_window(date, start, end).await {
                            error!(date = %date, error = %err, "Daily report failed");
                        }
                        not_before = (next + chrono::Duration::seconds(1)).max(self.clock.now());
                    }
                }
            }
            info!("Daily report scheduler stopped");
        });

        ScheduleHandle::new(shutdown_tx, task)
    }
}
