//! Telegram command parsing.

use thiserror::Error;

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    Track { username: String },
    Untrack { username: String },
    Tracked,
}

/// Parse error for Telegram command messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("message is not a command")]
    NotACommand,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("missing argument `{0}`")]
    MissingArgument(&'static str),
}

/// Parse a Telegram message into a bot command.
///
/// Accepts an optional `@botname` suffix on the command word.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/tracked" | "/list_tracked" => Ok(TelegramCommand::Tracked),
        "/track" => {
            let username = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("username"))?;
            Ok(TelegramCommand::Track {
                username: username.to_string(),
            })
        }
        "/untrack" => {
            let username = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("username"))?;
            Ok(TelegramCommand::Untrack {
                username: username.to_string(),
            })
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /track <username> - ✅ Announce this LeetCode user's solves here\n\
    /untrack <username> - 🛑 Stop announcing this user here\n\
    /tracked - 📊 Users tracked in this chat\n\
    /help - ℹ️ Show this message"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("track", "Announce a LeetCode user's solves here"),
        ("untrack", "Stop announcing a user here"),
        ("tracked", "Users tracked in this chat"),
        ("help", "Show available commands"),
    ]
}
