//! A notification sink that records what it was asked to send.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::domain::ChannelId;
use crate::port::outbound::notifier::{
    Delivery, Notification, NotificationError, NotificationSink,
};

/// Records every send. Sends to channels marked with
/// [`RecordingSink::reject`] are recorded and then reported as rejected.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(ChannelId, Notification)>>,
    rejected: Mutex<HashSet<ChannelId>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&self, channel: &ChannelId) {
        self.rejected.lock().insert(channel.clone());
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<(ChannelId, Notification)> {
        self.sent.lock().clone()
    }

    /// Notifications sent to one channel, in order.
    pub fn sent_to(&self, channel: &ChannelId) -> Vec<Notification> {
        self.sent
            .lock()
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, n)| n.clone())
            .collect()
    }

    /// First block title of every send, in order.
    pub fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|(_, n)| n.blocks.first().map(|b| b.title.clone()))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn send(&self, channel: &ChannelId, notification: Notification) -> Delivery {
        self.sent.lock().push((channel.clone(), notification));
        if self.rejected.lock().contains(channel) {
            Delivery::ready(Err(NotificationError::Rejected("scripted".into())))
        } else {
            Delivery::ready(Ok(()))
        }
    }
}
