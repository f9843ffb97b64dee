//! Tracking commands exposed to chat bots and the CLI.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{ChannelId, ScopeId, Username};
use crate::error::Result;

/// Result of a track request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The channel now receives this user's solves.
    Started,
    /// The channel was already bound; nothing changed.
    AlreadyTracked,
}

/// Result of an untrack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntrackOutcome {
    /// The binding was removed. `deactivated` is true when no channel
    /// tracks the user any more.
    Stopped { deactivated: bool },
    /// The channel was not tracking the user.
    NotTracked,
}

/// Upstream command surface.
#[async_trait]
pub trait TrackingCommands: Send + Sync {
    /// Bind `channel` to `username`. Starting to track triggers an
    /// immediate reconcile for the user.
    async fn track(&self, username: &Username, channel: &ChannelId) -> Result<TrackOutcome>;

    async fn untrack(&self, username: &Username, channel: &ChannelId) -> Result<UntrackOutcome>;

    /// True when the user is active and bound to `channel`.
    async fn is_tracked(&self, username: &Username, channel: &ChannelId) -> Result<bool>;

    /// Active users with at least one channel in `scope`, mapped to the
    /// number of their channels in that scope.
    async fn list_tracked(&self, scope: &ScopeId) -> Result<BTreeMap<Username, usize>>;
}
