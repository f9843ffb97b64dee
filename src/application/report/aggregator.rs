//! Daily aggregation and broadcast.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use super::render::render_report;
use super::window::day_window;
use crate::domain::{ChannelId, DailyReport, SolvedProblem, Standing, TrackedEntity};
use crate::error::Result;
use crate::port::outbound::difficulty::DifficultyResolver;
use crate::port::outbound::notifier::NotificationSink;
use crate::port::outbound::store::TrackingStore;

/// What one aggregation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRun {
    /// Nobody solved anything in the window.
    Skipped,
    /// The report went out.
    Sent { entities: usize, channels: usize },
}

/// Builds the daily leaderboard from solve history and broadcasts it.
pub struct DailyAggregator {
    store: Arc<dyn TrackingStore>,
    resolver: Arc<dyn DifficultyResolver>,
    sink: Arc<dyn NotificationSink>,
    timezone: Tz,
    chunk_size: usize,
}

impl DailyAggregator {
    /// Create an aggregator reporting in `timezone`, splitting long
    /// problem lists into fields of at most `chunk_size` characters.
    pub fn new(
        store: Arc<dyn TrackingStore>,
        resolver: Arc<dyn DifficultyResolver>,
        sink: Arc<dyn NotificationSink>,
        timezone: Tz,
        chunk_size: usize,
    ) -> Self {
        Self {
            store,
            resolver,
            sink,
            timezone,
            chunk_size,
        }
    }

    /// Timezone that local dates and report times are read in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Maximum length of one rendered field value.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build the ranked report for a local date without sending it.
    ///
    /// # Errors
    /// Returns an error when the store fails. Difficulty lookup failures
    /// only mark the problem as unknown.
    pub async fn build_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let entities = self.store.find_active_entities().await?;
        let (start, end) = day_window(date, self.timezone);
        self.build_from(&entities, date, start, end).await
    }

    async fn build_from(
        &self,
        entities: &[TrackedEntity],
        date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DailyReport> {
        let mut standings = Vec::new();

        for entity in entities {
            let records = self
                .store
                .list_solve_records_in_range(entity.username(), start, end)
                .await?;
            if records.is_empty() {
                continue;
            }

            let mut problems = Vec::with_capacity(records.len());
            for record in records {
                let difficulty = match self.resolver.resolve(record.slug()).await {
                    Ok(difficulty) => Some(difficulty),
                    Err(err) => {
                        warn!(slug = record.slug(), error = %err, "Difficulty lookup failed");
                        None
                    }
                };
                problems.push(SolvedProblem {
                    slug: record.slug().to_string(),
                    title: record.title().to_string(),
                    difficulty,
                });
            }
            standings.push(Standing {
                username: entity.username().clone(),
                problems,
            });
        }

        Ok(DailyReport::new(date, standings))
    }

    /// Build the report for the local day `date` and send it to every
    /// channel bound to any active entity.
    ///
    /// # Errors
    /// Returns an error when the store fails.
    pub async fn run(&self, date: NaiveDate) -> Result<ReportRun> {
        let (start, end) = day_window(date, self.timezone);
        self.run_window(date, start, end).await
    }

    /// Like [`run`](Self::run), but over the solves in `[start, end)`.
    /// `date` only labels the report.
    ///
    /// # Errors
    /// Returns an error when the store fails.
    pub async fn run_window(
        &self,
        date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ReportRun> {
        let entities = self.store.find_active_entities().await?;
        let report = self.build_from(&entities, date, start, end).await?;
        if report.is_empty() {
            info!(date = %date, "No solves today, daily report skipped");
            return Ok(ReportRun::Skipped);
        }

        let channels: BTreeSet<ChannelId> = entities
            .iter()
            .flat_map(|e| e.channels().iter().cloned())
            .collect();
        let notification = render_report(&report, self.chunk_size);
        for channel in &channels {
            drop(self.sink.send(channel, notification.clone()));
        }

        info!(
            date = %date,
            entities = report.standings().len(),
            channels = channels.len(),
            "Daily report sent"
        );
        Ok(ReportRun::Sent {
            entities: report.standings().len(),
            channels: channels.len(),
        })
    }
}
