//! Background schedulers with explicit start/stop.

mod daily;
mod polling;

pub use daily::DailyReportScheduler;
pub use polling::{PollingScheduler, TickSummary};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Handle for controlling a running scheduler.
pub struct ScheduleHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    pub(crate) fn new(shutdown_tx: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self { shutdown_tx, task }
    }

    /// Signal shutdown and wait for the loop to finish its current unit of
    /// work.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = self.task.await {
            warn!(error = %err, "Scheduler task ended abnormally");
        }
    }

    /// True once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
