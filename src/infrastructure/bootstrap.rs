//! Composition root: turns a [`Config`] into wired services.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::outbound::leetcode::{CachingResolver, LeetCodeClient, LeetCodeCredentials};
use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::SqliteTrackingStore;
use crate::application::reconcile::Reconciler;
use crate::application::report::DailyAggregator;
use crate::application::schedule::{DailyReportScheduler, PollingScheduler};
use crate::application::tracking::TrackingService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::difficulty::DifficultyResolver;
use crate::port::outbound::directory::{ChannelDirectory, FlatChannelDirectory};
use crate::port::outbound::notifier::{LogSink, NotificationSink};
use crate::port::outbound::source::SubmissionSource;
use crate::port::outbound::store::TrackingStore;

/// Outbound adapters chosen by configuration.
pub struct Adapters {
    pub store: Arc<dyn TrackingStore>,
    pub source: Arc<dyn SubmissionSource>,
    pub resolver: Arc<dyn DifficultyResolver>,
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
    pub directory: Arc<dyn ChannelDirectory>,
}

impl Adapters {
    /// Production adapters: SQLite store, LeetCode client, system clock.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &Config, sink: Arc<dyn NotificationSink>) -> Result<Self> {
        let store: Arc<dyn TrackingStore> = Arc::new(init_store(config)?);

        let credentials = LeetCodeCredentials::from_env();
        if credentials.is_some() {
            info!("LeetCode session credentials loaded");
        }
        let client = Arc::new(LeetCodeClient::from_config(
            &config.source,
            credentials.as_ref(),
        )?);
        let resolver: Arc<dyn DifficultyResolver> = Arc::new(CachingResolver::new(client.clone()));

        Ok(Self {
            store,
            source: client,
            resolver,
            sink,
            clock: Arc::new(SystemClock),
            directory: Arc::new(FlatChannelDirectory),
        })
    }
}

/// Application services over a set of adapters.
pub struct Services {
    pub store: Arc<dyn TrackingStore>,
    pub clock: Arc<dyn Clock>,
    pub reconciler: Arc<Reconciler>,
    pub tracking: Arc<TrackingService>,
    pub aggregator: Arc<DailyAggregator>,
}

impl Services {
    /// Wire services over `adapters`.
    ///
    /// # Errors
    /// Returns an error if the report timezone is invalid.
    #[allow(clippy::result_large_err)]
    pub fn build(config: &Config, adapters: Adapters) -> Result<Self> {
        let reconciler = Arc::new(
            Reconciler::new(
                adapters.source,
                Arc::clone(&adapters.store),
                Arc::clone(&adapters.sink),
                Arc::clone(&adapters.clock),
            )
            .with_fetch_timeout(Duration::from_secs(config.source.timeout_secs)),
        );

        let tracking = Arc::new(TrackingService::new(
            Arc::clone(&adapters.store),
            Arc::clone(&reconciler),
            adapters.directory,
            Arc::clone(&adapters.clock),
        ));

        let aggregator = Arc::new(DailyAggregator::new(
            Arc::clone(&adapters.store),
            adapters.resolver,
            adapters.sink,
            config.report.tz()?,
            config.report.chunk_size,
        ));

        Ok(Self {
            store: adapters.store,
            clock: adapters.clock,
            reconciler,
            tracking,
            aggregator,
        })
    }

    /// Services for one-shot CLI commands: production adapters with
    /// announcements written to the log.
    ///
    /// # Errors
    /// See [`Adapters::from_config`].
    #[allow(clippy::result_large_err)]
    pub fn for_command(config: &Config) -> Result<Self> {
        let adapters = Adapters::from_config(config, Arc::new(LogSink))?;
        Self::build(config, adapters)
    }

    /// The polling scheduler configured by `[polling]`.
    #[must_use]
    pub fn polling_scheduler(&self, config: &Config) -> PollingScheduler {
        let scheduler = PollingScheduler::new(
            Arc::clone(&self.reconciler),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            config.polling.interval(),
        );
        match config.polling.max_watermark_age() {
            Some(age) => scheduler.with_max_watermark_age(age),
            None => scheduler,
        }
    }

    /// The daily report scheduler configured by `[report]`.
    ///
    /// # Errors
    /// Returns an error if `report.time` is invalid.
    #[allow(clippy::result_large_err)]
    pub fn report_scheduler(&self, config: &Config) -> Result<DailyReportScheduler> {
        Ok(DailyReportScheduler::new(
            Arc::clone(&self.aggregator),
            Arc::clone(&self.clock),
            config.report.at()?,
        ))
    }
}

/// Open the SQLite database and apply migrations.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn init_store(config: &Config) -> Result<SqliteTrackingStore> {
    if let Some(parent) = std::path::Path::new(&config.database).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let pool = open(&config.database)?;
    info!(database = %config.database, "Database ready");
    Ok(SqliteTrackingStore::new(pool))
}

/// Read the bot token when Telegram is enabled.
#[must_use]
pub fn telegram_token(config: &Config) -> Option<String> {
    if !config.telegram.enabled {
        return None;
    }
    match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Some(token),
        _ => {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN not set");
            None
        }
    }
}
