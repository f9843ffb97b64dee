//! Notification adapters.
//!
//! Implements the `NotificationSink` port for chat backends. The in-process
//! `NullSink` and `LogSink` live next to the port.

#[cfg(feature = "telegram")]
pub mod telegram;
