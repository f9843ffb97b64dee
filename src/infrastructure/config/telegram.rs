//! Telegram bot configuration.

use serde::Deserialize;

/// `[telegram]` section. The bot token is read from `TELEGRAM_BOT_TOKEN`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver notifications and accept commands over Telegram.
    #[serde(default)]
    pub enabled: bool,
    /// Chats allowed to issue commands. Empty means any chat.
    #[serde(default)]
    pub allowed_chats: Vec<i64>,
}

impl TelegramAppConfig {
    #[must_use]
    pub fn allows(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allowlist_allows_everyone() {
        assert!(TelegramAppConfig::default().allows(-100));
    }

    #[test]
    fn allowlist_restricts() {
        let config = TelegramAppConfig {
            enabled: true,
            allowed_chats: vec![42],
        };
        assert!(config.allows(42));
        assert!(!config.allows(7));
    }
}
