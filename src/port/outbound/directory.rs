//! Channel-to-scope mapping.

use crate::domain::{ChannelId, ScopeId};

/// Maps a channel to the scope (server, group) that contains it.
pub trait ChannelDirectory: Send + Sync {
    /// The containing scope, or `None` when the channel is unknown.
    fn scope_of(&self, channel: &ChannelId) -> Option<ScopeId>;
}

/// Every channel is its own scope.
///
/// Fits chat platforms without a server layer, such as Telegram, where a
/// chat is both the channel and the group.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatChannelDirectory;

impl ChannelDirectory for FlatChannelDirectory {
    fn scope_of(&self, channel: &ChannelId) -> Option<ScopeId> {
        Some(ScopeId::new(channel.as_str()))
    }
}
