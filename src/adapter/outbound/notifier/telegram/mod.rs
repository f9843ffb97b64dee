//! Telegram notification and command handling.
//!
//! Delivers solve announcements and daily reports to chats, and exposes the
//! tracking commands (`/track`, `/untrack`, `/tracked`) to chat members.

mod auth;
mod command;
mod format;

pub mod notifier;

pub use notifier::{TelegramCommandListener, TelegramSink};
