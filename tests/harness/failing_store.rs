use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use solvewatch::domain::{
    BindOutcome, ChannelId, SolveRecord, TrackedEntity, UnbindOutcome, Username,
};
use solvewatch::error::{Error, Result};
use solvewatch::port::outbound::store::{TickCommit, TrackingStore};

/// Delegates to an inner store, failing `commit_tick` while armed.
pub struct FailingCommitStore {
    inner: Arc<dyn TrackingStore>,
    fail_commit: AtomicBool,
}

impl FailingCommitStore {
    pub fn new(inner: Arc<dyn TrackingStore>) -> Self {
        Self {
            inner,
            fail_commit: AtomicBool::new(false),
        }
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TrackingStore for FailingCommitStore {
    async fn find_active_entities(&self) -> Result<Vec<TrackedEntity>> {
        self.inner.find_active_entities().await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<TrackedEntity>> {
        self.inner.find_by_username(username).await
    }

    async fn save(&self, entity: &TrackedEntity) -> Result<()> {
        self.inner.save(entity).await
    }

    async fn find_solve_record(
        &self,
        username: &Username,
        slug: &str,
    ) -> Result<Option<SolveRecord>> {
        self.inner.find_solve_record(username, slug).await
    }

    async fn save_solve_record(&self, record: &SolveRecord) -> Result<()> {
        self.inner.save_solve_record(record).await
    }

    async fn increment_solve_record(
        &self,
        username: &Username,
        slug: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<SolveRecord>> {
        self.inner.increment_solve_record(username, slug, at).await
    }

    async fn list_solve_records_in_range(
        &self,
        username: &Username,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SolveRecord>> {
        self.inner
            .list_solve_records_in_range(username, start, end)
            .await
    }

    async fn bind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
        now: DateTime<Utc>,
    ) -> Result<BindOutcome> {
        self.inner.bind_channel(username, channel, now).await
    }

    async fn unbind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
    ) -> Result<UnbindOutcome> {
        self.inner.unbind_channel(username, channel).await
    }

    async fn advance_watermark(&self, username: &Username, to: DateTime<Utc>) -> Result<bool> {
        self.inner.advance_watermark(username, to).await
    }

    async fn commit_tick(&self, commit: &TickCommit) -> Result<()> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(Error::Database("disk I/O error".into()));
        }
        self.inner.commit_tick(commit).await
    }
}
