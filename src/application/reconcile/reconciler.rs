//! The reconcile tick.
//!
//! ```text
//! lock(user) -> re-read entity -> tick_start = now
//!     -> fetch recent (newest first) -> reverse
//!     -> for each event after watermark: update record, render, queue sends
//!     -> commit(records, watermark = tick_start) -> issue sends
//! ```
//!
//! Nothing is sent before the commit succeeds, so a failed commit leaves no
//! trace and the next tick retries the same events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::message::render_solve;
use crate::domain::{
    ChannelId, SolveOutcome, SolveRecord, SubmissionEvent, TrackedEntity, Username,
};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::notifier::{Notification, NotificationSink};
use crate::port::outbound::source::{SourceError, SubmissionSource};
use crate::port::outbound::store::{TickCommit, TrackingStore};

/// What a single reconcile call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The entity is unknown or inactive.
    Skipped,
    /// The source call failed; no state changed.
    SourceFailed(SourceError),
    /// The tick committed.
    Committed {
        /// Events newer than the watermark.
        new_events: usize,
        /// Sends issued after the commit.
        deliveries: usize,
    },
}

/// Reconciles one entity at a time against the submission source.
///
/// Calls for the same username are serialised through a per-username async
/// lock; calls for different usernames run independently.
pub struct Reconciler {
    source: Arc<dyn SubmissionSource>,
    store: Arc<dyn TrackingStore>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    fetch_timeout: Option<Duration>,
    locks: DashMap<Username, Arc<Mutex<()>>>,
}

impl Reconciler {
    /// Create a reconciler with no fetch timeout.
    pub fn new(
        source: Arc<dyn SubmissionSource>,
        store: Arc<dyn TrackingStore>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            store,
            sink,
            clock,
            fetch_timeout: None,
            locks: DashMap::new(),
        }
    }

    /// Abort a tick whose fetch takes longer than `timeout`.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Reconcile an entity from a listing.
    ///
    /// The listed snapshot only supplies the username; the entity is
    /// re-read under the lock so a watermark advanced in the meantime is
    /// honoured.
    ///
    /// # Errors
    /// Returns an error when the store fails. Nothing from the tick is
    /// persisted or sent in that case.
    pub async fn reconcile_one(&self, entity: &TrackedEntity) -> Result<ReconcileOutcome> {
        self.reconcile(entity.username()).await
    }

    /// Reconcile the entity stored under `username`.
    ///
    /// # Errors
    /// Returns an error when the store fails.
    pub async fn reconcile(&self, username: &Username) -> Result<ReconcileOutcome> {
        let lock = self.lock_for(username);
        let _guard = lock.lock().await;

        let entity = match self.store.find_by_username(username).await? {
            Some(entity) if entity.is_active() => entity,
            _ => {
                debug!(username = %username, "Entity missing or inactive, skipping");
                return Ok(ReconcileOutcome::Skipped);
            }
        };

        let tick_start = self.clock.now();
        let events = match self.fetch(username).await {
            Ok(events) => events,
            Err(err) => {
                warn!(username = %username, error = %err, "Fetch failed, tick skipped");
                return Ok(ReconcileOutcome::SourceFailed(err));
            }
        };

        let watermark = entity.watermark();
        let mut pending: HashMap<String, SolveRecord> = HashMap::new();
        let mut outbox: Vec<(ChannelId, Notification)> = Vec::new();
        let mut new_events = 0;

        for event in events.iter().rev().filter(|e| e.is_after(watermark)) {
            new_events += 1;
            let (record, outcome) = self.apply(username, event, &mut pending).await?;
            pending.insert(record.slug().to_string(), record);

            // Bindings may change mid-tick through track/untrack.
            let notification = render_solve(username, event, outcome);
            for channel in self.bound_channels(username).await? {
                outbox.push((channel, notification.clone()));
            }
        }

        self.store
            .commit_tick(&TickCommit {
                username: username.clone(),
                records: pending.into_values().collect(),
                watermark: tick_start,
            })
            .await?;

        let deliveries = outbox.len();
        for (channel, notification) in outbox {
            // Fire-and-forget: the sink logs its own failures.
            drop(self.sink.send(&channel, notification));
        }

        if new_events > 0 {
            info!(
                username = %username,
                new_events,
                deliveries,
                "Announced new solves"
            );
        } else {
            debug!(username = %username, fetched = events.len(), "No new solves");
        }

        Ok(ReconcileOutcome::Committed {
            new_events,
            deliveries,
        })
    }

    /// Update (or create) the record for one event. Records already touched
    /// in this tick take precedence over the stored copy.
    async fn apply(
        &self,
        username: &Username,
        event: &SubmissionEvent,
        pending: &mut HashMap<String, SolveRecord>,
    ) -> Result<(SolveRecord, SolveOutcome)> {
        let now = self.clock.now();
        let existing = match pending.remove(&event.slug) {
            Some(record) => Some(record),
            None => self.store.find_solve_record(username, &event.slug).await?,
        };
        Ok(match existing {
            Some(mut record) => {
                let outcome = record.record_again(&event.title, now);
                (record, outcome)
            }
            None => (
                SolveRecord::first(username.clone(), &event.slug, &event.title, now),
                SolveOutcome::Solved,
            ),
        })
    }

    /// Channels currently bound to the entity. Empty once it went inactive.
    async fn bound_channels(&self, username: &Username) -> Result<Vec<ChannelId>> {
        Ok(self
            .store
            .find_by_username(username)
            .await?
            .filter(TrackedEntity::is_active)
            .map(|entity| entity.channels().iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch(
        &self,
        username: &Username,
    ) -> std::result::Result<Vec<SubmissionEvent>, SourceError> {
        match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch_recent(username))
                .await
                .unwrap_or_else(|_| Err(SourceError::Timeout(limit))),
            None => self.source.fetch_recent(username).await,
        }
    }

    fn lock_for(&self, username: &Username) -> Arc<Mutex<()>> {
        self.locks
            .entry(username.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
