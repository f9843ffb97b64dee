//! Telegram delivery and command listener.
//!
//! [`TelegramSink`] implements [`NotificationSink`] by queuing messages onto a
//! background worker, so callers never wait on the Bot API.
//! [`TelegramCommandListener`] answers tracking commands in any chat the bot
//! is in.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::auth::command_response_for_message;
use super::command::bot_commands;
use super::format::{render_block, MESSAGE_LIMIT};
use crate::domain::ChannelId;
use crate::port::inbound::tracking::TrackingCommands;
use crate::port::outbound::notifier::{
    Delivery, DeliveryReporter, Notification, NotificationError, NotificationSink,
};

struct Outbound {
    chat_id: ChatId,
    notification: Notification,
    reporter: DeliveryReporter,
}

/// Sends notifications to Telegram chats. The channel id is the numeric chat id.
pub struct TelegramSink {
    sender: mpsc::UnboundedSender<Outbound>,
}

impl TelegramSink {
    /// Spawn the delivery worker. Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(bot: Bot) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(telegram_worker(bot, receiver));
        Self { sender }
    }
}

impl NotificationSink for TelegramSink {
    fn send(&self, channel: &ChannelId, notification: Notification) -> Delivery {
        let Ok(chat_id) = channel.as_str().parse::<i64>() else {
            return Delivery::ready(Err(NotificationError::InvalidChannel(
                channel.to_string(),
            )));
        };

        let (reporter, delivery) = Delivery::pending();
        let outbound = Outbound {
            chat_id: ChatId(chat_id),
            notification,
            reporter,
        };
        if let Err(mpsc::error::SendError(outbound)) = self.sender.send(outbound) {
            warn!(channel = %channel, "Telegram notifier channel closed");
            outbound.reporter.report(Err(NotificationError::Closed));
        }
        delivery
    }
}

/// Background worker that sends Telegram messages one notification at a time.
async fn telegram_worker(bot: Bot, mut receiver: mpsc::UnboundedReceiver<Outbound>) {
    info!("Telegram notifier started");

    while let Some(outbound) = receiver.recv().await {
        let result = deliver(&bot, outbound.chat_id, &outbound.notification).await;
        if let Err(e) = &result {
            error!(chat_id = outbound.chat_id.0, error = %e, "Failed to send Telegram message");
        }
        outbound.reporter.report(result);
    }

    warn!("Telegram notifier worker shutting down");
}

async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    notification: &Notification,
) -> Result<(), NotificationError> {
    for block in &notification.blocks {
        for text in render_block(block, MESSAGE_LIMIT) {
            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::MarkdownV2)
                .await
                .map_err(|e| NotificationError::Rejected(e.to_string()))?;
        }
    }
    debug!(chat_id = chat_id.0, summary = %notification.summary(), "Telegram message sent");
    Ok(())
}

/// Answers `/track`, `/untrack` and `/tracked` in chats.
pub struct TelegramCommandListener {
    bot: Bot,
    commands: Arc<dyn TrackingCommands>,
    allowed_chats: Arc<[i64]>,
}

impl TelegramCommandListener {
    pub fn new(bot: Bot, commands: Arc<dyn TrackingCommands>, allowed_chats: Vec<i64>) -> Self {
        Self {
            bot,
            commands,
            allowed_chats: allowed_chats.into(),
        }
    }

    /// Spawn the long-polling loop. Abort the handle to stop it.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.listen())
    }

    async fn listen(self) {
        if let Err(e) = register_bot_commands(&self.bot).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }

        info!(
            allowed_chats = self.allowed_chats.len(),
            "Telegram command listener started"
        );

        let commands = self.commands;
        let allowed_chats = self.allowed_chats;
        teloxide::repl(self.bot, move |bot: Bot, msg: Message| {
            let commands = Arc::clone(&commands);
            let allowed_chats = Arc::clone(&allowed_chats);
            async move {
                let Some(text) = msg.text() else {
                    return respond(());
                };

                if let Some(response) = command_response_for_message(
                    text,
                    msg.chat.id.0,
                    &allowed_chats,
                    commands.as_ref(),
                )
                .await
                {
                    if let Err(e) = bot.send_message(msg.chat.id, response).await {
                        error!(error = %e, "Failed to send Telegram command response");
                    }
                }

                respond(())
            }
        })
        .await;
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
