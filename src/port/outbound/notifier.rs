//! Notification port.
//!
//! A [`Notification`] is an ordered list of [`Block`]s, each a titled card
//! with an optional description and ordered name/value fields. Sinks decide
//! how to render blocks for their medium.
//!
//! Sending is fire-and-forget: [`NotificationSink::send`] only enqueues and
//! hands back a [`Delivery`] that callers may await or drop.

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::info;

use crate::domain::ChannelId;

/// A single named value inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One card of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

impl Block {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }
}

/// What a sink receives: one or more blocks delivered in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub blocks: Vec<Block>,
}

impl Notification {
    #[must_use]
    pub fn single(block: Block) -> Self {
        Self {
            blocks: vec![block],
        }
    }

    #[must_use]
    pub fn bundle(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Block titles joined by `" | "`, used in log lines.
    #[must_use]
    pub fn summary(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.title.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Delivery failures. Logged only; they never roll back tracking state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("invalid channel `{0}`")]
    InvalidChannel(String),

    #[error("delivery rejected: {0}")]
    Rejected(String),

    #[error("notification worker closed")]
    Closed,
}

/// Handle to the eventual outcome of one send.
#[derive(Debug)]
pub struct Delivery {
    receiver: oneshot::Receiver<Result<(), NotificationError>>,
}

/// Sender half kept by the sink to report the outcome of a [`Delivery`].
#[derive(Debug)]
pub struct DeliveryReporter {
    sender: oneshot::Sender<Result<(), NotificationError>>,
}

impl Delivery {
    /// A pending delivery and the reporter that completes it.
    #[must_use]
    pub fn pending() -> (DeliveryReporter, Self) {
        let (sender, receiver) = oneshot::channel();
        (DeliveryReporter { sender }, Self { receiver })
    }

    /// A delivery whose outcome is already known.
    #[must_use]
    pub fn ready(result: Result<(), NotificationError>) -> Self {
        let (reporter, delivery) = Self::pending();
        reporter.report(result);
        delivery
    }

    /// Wait for the outcome. A reporter dropped without reporting counts
    /// as [`NotificationError::Closed`].
    pub async fn outcome(self) -> Result<(), NotificationError> {
        self.receiver
            .await
            .unwrap_or(Err(NotificationError::Closed))
    }
}

impl DeliveryReporter {
    pub fn report(self, result: Result<(), NotificationError>) {
        // The caller may have dropped its handle.
        let _ = self.sender.send(result);
    }
}

/// Delivers notifications to destination channels.
///
/// Implementations must return quickly: slow I/O belongs in a background
/// worker, with the outcome reported through the [`Delivery`].
pub trait NotificationSink: Send + Sync {
    fn send(&self, channel: &ChannelId, notification: Notification) -> Delivery;
}

/// Discards every notification.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn send(&self, _channel: &ChannelId, _notification: Notification) -> Delivery {
        Delivery::ready(Ok(()))
    }
}

/// Logs notifications via tracing instead of delivering them.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn send(&self, channel: &ChannelId, notification: Notification) -> Delivery {
        for block in &notification.blocks {
            info!(
                channel = %channel,
                title = %block.title,
                fields = block.fields.len(),
                "Notification"
            );
        }
        Delivery::ready(Ok(()))
    }
}
