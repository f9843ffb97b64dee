//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`tracking`]: track/untrack/list commands used by the Telegram bot and
//!   the CLI

pub mod tracking;
