//! In-memory tracking store, for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{
    BindOutcome, ChannelId, SolveRecord, TrackedEntity, UnbindOutcome, Username,
};
use crate::error::Result;
use crate::port::outbound::store::{TickCommit, TrackingStore};

#[derive(Debug, Default)]
struct State {
    entities: HashMap<Username, TrackedEntity>,
    records: HashMap<(Username, String), SolveRecord>,
}

/// Tracking store kept entirely in memory.
///
/// One lock guards all state, so every operation is atomic.
#[derive(Debug, Default)]
pub struct MemoryTrackingStore {
    state: RwLock<State>,
}

impl MemoryTrackingStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(username: &Username, slug: &str) -> (Username, String) {
        (username.clone(), slug.to_string())
    }
}

#[async_trait]
impl TrackingStore for MemoryTrackingStore {
    async fn find_active_entities(&self) -> Result<Vec<TrackedEntity>> {
        let state = self.state.read();
        let mut active: Vec<TrackedEntity> = state
            .entities
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(active)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<TrackedEntity>> {
        Ok(self.state.read().entities.get(username).cloned())
    }

    async fn save(&self, entity: &TrackedEntity) -> Result<()> {
        self.state
            .write()
            .entities
            .insert(entity.username().clone(), entity.clone());
        Ok(())
    }

    async fn find_solve_record(
        &self,
        username: &Username,
        slug: &str,
    ) -> Result<Option<SolveRecord>> {
        Ok(self
            .state
            .read()
            .records
            .get(&Self::key(username, slug))
            .cloned())
    }

    async fn save_solve_record(&self, record: &SolveRecord) -> Result<()> {
        self.state.write().records.insert(
            Self::key(record.username(), record.slug()),
            record.clone(),
        );
        Ok(())
    }

    async fn increment_solve_record(
        &self,
        username: &Username,
        slug: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<SolveRecord>> {
        let mut state = self.state.write();
        Ok(state.records.get_mut(&Self::key(username, slug)).map(|record| {
            let title = record.title().to_string();
            record.record_again(&title, at);
            record.clone()
        }))
    }

    async fn list_solve_records_in_range(
        &self,
        username: &Username,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SolveRecord>> {
        let state = self.state.read();
        let mut records: Vec<SolveRecord> = state
            .records
            .values()
            .filter(|r| r.username() == username)
            .filter(|r| r.last_solved_at() >= start && r.last_solved_at() < end)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.last_solved_at()
                .cmp(&b.last_solved_at())
                .then_with(|| a.slug().cmp(b.slug()))
        });
        Ok(records)
    }

    async fn bind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
        now: DateTime<Utc>,
    ) -> Result<BindOutcome> {
        let mut state = self.state.write();
        match state.entities.get_mut(username) {
            Some(entity) => Ok(entity.bind(channel.clone(), now)),
            None => {
                state.entities.insert(
                    username.clone(),
                    TrackedEntity::new(username.clone(), channel.clone(), now),
                );
                Ok(BindOutcome::Created)
            }
        }
    }

    async fn unbind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
    ) -> Result<UnbindOutcome> {
        let mut state = self.state.write();
        Ok(state
            .entities
            .get_mut(username)
            .map_or(UnbindOutcome::NotBound, |entity| entity.unbind(channel)))
    }

    async fn advance_watermark(&self, username: &Username, to: DateTime<Utc>) -> Result<bool> {
        let mut state = self.state.write();
        Ok(state
            .entities
            .get_mut(username)
            .is_some_and(|entity| entity.advance_watermark(to)))
    }

    async fn commit_tick(&self, commit: &TickCommit) -> Result<()> {
        let mut state = self.state.write();
        for record in &commit.records {
            state.records.insert(
                Self::key(record.username(), record.slug()),
                record.clone(),
            );
        }
        if let Some(entity) = state.entities.get_mut(&commit.username) {
            entity.advance_watermark(commit.watermark);
        }
        Ok(())
    }
}
