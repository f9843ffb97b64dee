//! Authorization and dispatch for Telegram command handling.

use tracing::{error, warn};

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};
use crate::domain::{ChannelId, ScopeId, Username};
use crate::error::Error;
use crate::port::inbound::tracking::{TrackOutcome, TrackingCommands, UntrackOutcome};

/// Process a message and return a response if it's an authorized command.
///
/// Returns `None` for messages from chats outside `allowed_chats` and for
/// messages that are not commands. The invoking chat is both the channel
/// and the scope of the command.
pub async fn command_response_for_message(
    text: &str,
    chat_id: i64,
    allowed_chats: &[i64],
    commands: &dyn TrackingCommands,
) -> Option<String> {
    if !is_authorized_chat(chat_id, allowed_chats) {
        return None;
    }

    match parse_command(text) {
        Ok(command) => Some(execute(command, chat_id, commands).await),
        Err(CommandParseError::NotACommand) => None,
        Err(err) => Some(format!("Invalid command: {err}\n\n{}", command_help())),
    }
}

fn is_authorized_chat(chat_id: i64, allowed_chats: &[i64]) -> bool {
    if allowed_chats.is_empty() || allowed_chats.contains(&chat_id) {
        return true;
    }

    warn!(chat_id, "Ignoring Telegram message from unauthorized chat");
    false
}

async fn execute(
    command: TelegramCommand,
    chat_id: i64,
    commands: &dyn TrackingCommands,
) -> String {
    let channel = ChannelId::from(chat_id);
    let result = match command {
        TelegramCommand::Start | TelegramCommand::Help => Ok(command_help().to_string()),
        TelegramCommand::Track { username } => track(&username, &channel, commands).await,
        TelegramCommand::Untrack { username } => untrack(&username, &channel, commands).await,
        TelegramCommand::Tracked => tracked(&channel, commands).await,
    };

    match result {
        Ok(reply) => reply,
        Err(Error::Domain(err)) => format!("❌ {err}"),
        Err(err) => {
            error!(chat_id, error = %err, "Telegram command failed");
            "⚠️ Something went wrong, please try again later.".to_string()
        }
    }
}

async fn track(
    raw: &str,
    channel: &ChannelId,
    commands: &dyn TrackingCommands,
) -> Result<String, Error> {
    let username = Username::parse(raw)?;
    let reply = match commands.track(&username, channel).await? {
        TrackOutcome::Started => {
            format!("✅ Now tracking LeetCode submissions for user {username}!")
        }
        TrackOutcome::AlreadyTracked => {
            format!("❌ User {username} is already being tracked in this chat!")
        }
    };
    Ok(reply)
}

async fn untrack(
    raw: &str,
    channel: &ChannelId,
    commands: &dyn TrackingCommands,
) -> Result<String, Error> {
    let username = Username::parse(raw)?;
    let reply = match commands.untrack(&username, channel).await? {
        UntrackOutcome::Stopped { .. } => {
            format!("✅ Stopped tracking LeetCode submissions for user {username}!")
        }
        UntrackOutcome::NotTracked => {
            format!("❌ User {username} is not being tracked in this chat!")
        }
    };
    Ok(reply)
}

async fn tracked(channel: &ChannelId, commands: &dyn TrackingCommands) -> Result<String, Error> {
    let scope = ScopeId::new(channel.as_str());
    let users = commands.list_tracked(&scope).await?;
    if users.is_empty() {
        return Ok("❌ No users are currently being tracked in this chat.".to_string());
    }

    let mut reply = String::from("📊 Tracked LeetCode Users\n\n");
    for (username, channels) in &users {
        let plural = if *channels == 1 { "" } else { "s" };
        reply.push_str(&format!(
            "• {username} (tracked in {channels} channel{plural})\n"
        ));
    }
    reply.push_str(&format!("\nTotal: {} user(s)", users.len()));
    Ok(reply)
}
