//! Persistence port for tracked entities and solve history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    BindOutcome, ChannelId, SolveRecord, TrackedEntity, UnbindOutcome, Username,
};
use crate::error::Result;

/// Everything one reconcile tick writes, committed as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickCommit {
    pub username: Username,
    /// Final state of every record the tick touched.
    pub records: Vec<SolveRecord>,
    /// Start time of the tick. Applied as `max(current, watermark)`.
    pub watermark: DateTime<Utc>,
}

/// Storage operations for tracking state.
///
/// Implementations must make each per-entity mutation atomic. Writes to
/// different entities never block on each other beyond the backend's own
/// locking.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// All entities currently marked active.
    async fn find_active_entities(&self) -> Result<Vec<TrackedEntity>>;

    /// Look up an entity, active or not.
    async fn find_by_username(&self, username: &Username) -> Result<Option<TrackedEntity>>;

    /// Insert or replace an entity together with its channel set.
    async fn save(&self, entity: &TrackedEntity) -> Result<()>;

    async fn find_solve_record(
        &self,
        username: &Username,
        slug: &str,
    ) -> Result<Option<SolveRecord>>;

    /// Insert or replace a solve record.
    async fn save_solve_record(&self, record: &SolveRecord) -> Result<()>;

    /// Bump the count of an existing record and set its timestamp to `at`.
    /// Returns the updated record, or `None` when no record exists.
    async fn increment_solve_record(
        &self,
        username: &Username,
        slug: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<SolveRecord>>;

    /// Records whose `last_solved_at` lies in `[start, end)`.
    async fn list_solve_records_in_range(
        &self,
        username: &Username,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SolveRecord>>;

    /// Atomically bind a channel, creating or reactivating the entity.
    async fn bind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
        now: DateTime<Utc>,
    ) -> Result<BindOutcome>;

    /// Atomically remove a binding, deactivating the entity if it was the last.
    async fn unbind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
    ) -> Result<UnbindOutcome>;

    /// Move the watermark forward only. Returns whether it changed.
    async fn advance_watermark(&self, username: &Username, to: DateTime<Utc>) -> Result<bool>;

    /// Persist a tick's records and watermark in one transaction. On error
    /// nothing from the tick is visible.
    async fn commit_tick(&self, commit: &TickCommit) -> Result<()>;
}
