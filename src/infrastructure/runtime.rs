//! Long-running service: schedulers, Telegram listener, graceful shutdown.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use super::bootstrap::{telegram_token, Adapters, Services};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{LogSink, NotificationSink};

/// Run until Ctrl-C. Schedulers finish their current unit of work before
/// the process exits.
///
/// # Errors
/// Returns an error if startup wiring fails.
pub async fn run(config: Config) -> Result<()> {
    let token = telegram_token(&config);
    let sink = build_sink(token.as_deref());

    let services = Services::build(&config, Adapters::from_config(&config, sink)?)?;

    let listener = spawn_listener(&config, token.as_deref(), &services);

    let polling = Arc::new(services.polling_scheduler(&config)).start();
    let daily = if config.report.enabled {
        Some(Arc::new(services.report_scheduler(&config)?).start())
    } else {
        info!("Daily report disabled");
        None
    };

    info!("solvewatch running");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    if let Some(listener) = listener {
        listener.abort();
    }
    polling.stop().await;
    if let Some(daily) = daily {
        daily.stop().await;
    }

    info!("solvewatch stopped");
    Ok(())
}

#[cfg(feature = "telegram")]
fn build_sink(token: Option<&str>) -> Arc<dyn NotificationSink> {
    use crate::adapter::outbound::notifier::telegram::TelegramSink;

    match token {
        Some(token) => {
            info!("Telegram notifier enabled");
            Arc::new(TelegramSink::spawn(teloxide::Bot::new(token)))
        }
        None => Arc::new(LogSink),
    }
}

#[cfg(not(feature = "telegram"))]
fn build_sink(_token: Option<&str>) -> Arc<dyn NotificationSink> {
    Arc::new(LogSink)
}

#[cfg(feature = "telegram")]
fn spawn_listener(
    config: &Config,
    token: Option<&str>,
    services: &Services,
) -> Option<JoinHandle<()>> {
    use crate::adapter::outbound::notifier::telegram::TelegramCommandListener;

    let token = token?;
    let listener = TelegramCommandListener::new(
        teloxide::Bot::new(token),
        services.tracking.clone(),
        config.telegram.allowed_chats.clone(),
    );
    Some(listener.spawn())
}

#[cfg(not(feature = "telegram"))]
fn spawn_listener(
    _config: &Config,
    _token: Option<&str>,
    _services: &Services,
) -> Option<JoinHandle<()>> {
    None
}
