//! Track/untrack use cases.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::reconcile::{ReconcileOutcome, Reconciler};
use crate::domain::{BindOutcome, ChannelId, ScopeId, UnbindOutcome, Username};
use crate::error::Result;
use crate::port::inbound::tracking::{TrackOutcome, TrackingCommands, UntrackOutcome};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::directory::ChannelDirectory;
use crate::port::outbound::store::TrackingStore;

/// Implements [`TrackingCommands`] on top of the store and reconciler.
pub struct TrackingService {
    store: Arc<dyn TrackingStore>,
    reconciler: Arc<Reconciler>,
    directory: Arc<dyn ChannelDirectory>,
    clock: Arc<dyn Clock>,
}

impl TrackingService {
    /// Create the service. `directory` tells which scope a channel belongs
    /// to when listing; `reconciler` runs a tick after every new binding.
    pub fn new(
        store: Arc<dyn TrackingStore>,
        reconciler: Arc<Reconciler>,
        directory: Arc<dyn ChannelDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            reconciler,
            directory,
            clock,
        }
    }
}

#[async_trait]
impl TrackingCommands for TrackingService {
    async fn track(&self, username: &Username, channel: &ChannelId) -> Result<TrackOutcome> {
        let outcome = self
            .store
            .bind_channel(username, channel, self.clock.now())
            .await?;

        if !outcome.started_tracking() {
            return Ok(TrackOutcome::AlreadyTracked);
        }

        info!(
            username = %username,
            channel = %channel,
            reactivated = matches!(outcome, BindOutcome::Reactivated),
            "Started tracking"
        );

        // Out-of-band reconcile. A failure here is not a failure of the
        // bind; the periodic tick will retry.
        match self.reconciler.reconcile(username).await {
            Ok(ReconcileOutcome::SourceFailed(err)) => {
                warn!(username = %username, error = %err, "Initial check failed");
            }
            Err(err) => {
                warn!(username = %username, error = %err, "Initial check failed");
            }
            Ok(_) => {}
        }

        Ok(TrackOutcome::Started)
    }

    async fn untrack(&self, username: &Username, channel: &ChannelId) -> Result<UntrackOutcome> {
        match self.store.unbind_channel(username, channel).await? {
            UnbindOutcome::NotBound => Ok(UntrackOutcome::NotTracked),
            UnbindOutcome::Removed { deactivated } => {
                info!(
                    username = %username,
                    channel = %channel,
                    deactivated,
                    "Stopped tracking"
                );
                Ok(UntrackOutcome::Stopped { deactivated })
            }
        }
    }

    async fn is_tracked(&self, username: &Username, channel: &ChannelId) -> Result<bool> {
        Ok(self
            .store
            .find_by_username(username)
            .await?
            .is_some_and(|entity| entity.is_bound(channel)))
    }

    async fn list_tracked(&self, scope: &ScopeId) -> Result<BTreeMap<Username, usize>> {
        let mut tracked = BTreeMap::new();
        for entity in self.store.find_active_entities().await? {
            let in_scope = entity
                .channels()
                .iter()
                .filter(|channel| self.directory.scope_of(channel).as_ref() == Some(scope))
                .count();
            if in_scope > 0 {
                tracked.insert(entity.username().clone(), in_scope);
            }
        }
        Ok(tracked)
    }
}
