//! Tracked entity: a monitored username plus its destination channels.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::id::{ChannelId, Username};

/// Result of binding a channel to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The entity did not exist and was created with this channel.
    Created,
    /// The entity existed but was inactive; it is active again.
    Reactivated,
    /// The channel was added to an already active entity.
    Added,
    /// The channel was already bound to the active entity.
    AlreadyBound,
}

impl BindOutcome {
    /// Whether the bind changed anything.
    #[must_use]
    pub const fn started_tracking(self) -> bool {
        !matches!(self, Self::AlreadyBound)
    }
}

/// Result of removing a channel binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnbindOutcome {
    /// The channel was not bound (or the entity is unknown or inactive).
    NotBound,
    /// The binding was removed.
    Removed {
        /// True when this was the last channel and the entity went inactive.
        deactivated: bool,
    },
}

/// A monitored username with its channel set and watermark.
///
/// Invariants:
/// - while `active`, the channel set is non-empty;
/// - the watermark never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntity {
    username: Username,
    channels: BTreeSet<ChannelId>,
    active: bool,
    watermark: DateTime<Utc>,
}

impl TrackedEntity {
    /// Create a newly tracked entity bound to one channel.
    ///
    /// The watermark starts at `now`, so nothing solved before the first
    /// track request is announced.
    #[must_use]
    pub fn new(username: Username, channel: ChannelId, now: DateTime<Utc>) -> Self {
        Self {
            username,
            channels: BTreeSet::from([channel]),
            active: true,
            watermark: now,
        }
    }

    /// Rebuild an entity from persisted state.
    #[must_use]
    pub fn restore(
        username: Username,
        channels: BTreeSet<ChannelId>,
        active: bool,
        watermark: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            channels,
            active,
            watermark,
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn channels(&self) -> &BTreeSet<ChannelId> {
        &self.channels
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn watermark(&self) -> DateTime<Utc> {
        self.watermark
    }

    /// True when the entity is active and `channel` is bound to it.
    #[must_use]
    pub fn is_bound(&self, channel: &ChannelId) -> bool {
        self.active && self.channels.contains(channel)
    }

    /// Bind a channel.
    ///
    /// Binding to an inactive entity reactivates it and moves the watermark
    /// up to `now`, so solves made while it was untracked are not replayed.
    pub fn bind(&mut self, channel: ChannelId, now: DateTime<Utc>) -> BindOutcome {
        if !self.active {
            self.active = true;
            self.channels.insert(channel);
            self.advance_watermark(now);
            return BindOutcome::Reactivated;
        }
        if self.channels.insert(channel) {
            BindOutcome::Added
        } else {
            BindOutcome::AlreadyBound
        }
    }

    /// Remove a channel binding, deactivating the entity when none remain.
    pub fn unbind(&mut self, channel: &ChannelId) -> UnbindOutcome {
        if !self.active || !self.channels.remove(channel) {
            return UnbindOutcome::NotBound;
        }
        let deactivated = self.channels.is_empty();
        if deactivated {
            self.active = false;
        }
        UnbindOutcome::Removed { deactivated }
    }

    /// Move the watermark forward. Returns false (and changes nothing) when
    /// `to` is not later than the current watermark.
    pub fn advance_watermark(&mut self, to: DateTime<Utc>) -> bool {
        if to > self.watermark {
            self.watermark = to;
            true
        } else {
            false
        }
    }
}
