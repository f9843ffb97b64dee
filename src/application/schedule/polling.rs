//! Fixed-interval polling of all active entities.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::ScheduleHandle;
use crate::application::reconcile::{ReconcileOutcome, Reconciler};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::TrackingStore;

/// Counters for one polling tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub entities: usize,
    pub committed: usize,
    pub new_events: usize,
    pub skipped: usize,
    pub source_failures: usize,
    pub store_failures: usize,
}

/// Reconciles every active entity on a fixed period.
pub struct PollingScheduler {
    reconciler: Arc<Reconciler>,
    store: Arc<dyn TrackingStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    max_watermark_age: Option<chrono::Duration>,
}

impl PollingScheduler {
    pub fn new(
        reconciler: Arc<Reconciler>,
        store: Arc<dyn TrackingStore>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            reconciler,
            store,
            clock,
            interval,
            max_watermark_age: None,
        }
    }

    /// Before the first tick, advance watermarks older than `age` to now.
    #[must_use]
    pub fn with_max_watermark_age(mut self, age: chrono::Duration) -> Self {
        self.max_watermark_age = Some(age);
        self
    }

    /// Advance stale watermarks so a long outage does not replay a burst of
    /// old solves. Returns how many entities were touched.
    ///
    /// # Errors
    /// Returns an error when the store fails.
    pub async fn refresh_stale_watermarks(&self) -> Result<usize> {
        let Some(max_age) = self.max_watermark_age else {
            return Ok(0);
        };
        let now = self.clock.now();
        let mut refreshed = 0;
        for entity in self.store.find_active_entities().await? {
            if now - entity.watermark() > max_age
                && self.store.advance_watermark(entity.username(), now).await?
            {
                warn!(
                    username = %entity.username(),
                    watermark = %entity.watermark(),
                    "Stale watermark advanced to now"
                );
                refreshed += 1;
            }
        }
        Ok(refreshed)
    }

    /// Run one tick: list active entities and reconcile each in turn.
    pub async fn run_tick(&self) -> TickSummary {
        self.tick(None).await
    }

    async fn tick(&self, shutdown: Option<&watch::Receiver<bool>>) -> TickSummary {
        let mut summary = TickSummary::default();
        let entities = match self.store.find_active_entities().await {
            Ok(entities) => entities,
            Err(err) => {
                error!(error = %err, "Failed to list active entities");
                summary.store_failures += 1;
                return summary;
            }
        };
        summary.entities = entities.len();

        for entity in &entities {
            if shutdown.is_some_and(|rx| *rx.borrow()) {
                debug!("Shutdown requested, ending tick early");
                break;
            }
            match self.reconciler.reconcile_one(entity).await {
                Ok(ReconcileOutcome::Committed { new_events, .. }) => {
                    summary.committed += 1;
                    summary.new_events += new_events;
                }
                Ok(ReconcileOutcome::Skipped) => summary.skipped += 1,
                Ok(ReconcileOutcome::SourceFailed(_)) => summary.source_failures += 1,
                Err(err) => {
                    error!(username = %entity.username(), error = %err, "Reconcile failed");
                    summary.store_failures += 1;
                }
            }
        }
        summary
    }

    /// Spawn the polling loop. The first tick runs immediately; missed
    /// ticks are skipped rather than bursted.
    pub fn start(self: Arc<Self>) -> ScheduleHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            match self.refresh_stale_watermarks().await {
                Ok(0) => {}
                Ok(n) => info!(refreshed = n, "Refreshed stale watermarks"),
                Err(err) => error!(error = %err, "Failed to refresh stale watermarks"),
            }

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(interval_secs = self.interval.as_secs(), "Polling scheduler started");

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let summary = self.tick(Some(&shutdown_rx)).await;
                        debug!(?summary, "Polling tick finished");
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Polling scheduler stopped");
        });

        ScheduleHandle::new(shutdown_tx, task)
    }
}
