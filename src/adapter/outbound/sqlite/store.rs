//! SQLite tracking store implementation.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text (microsecond
//! precision, `Z` suffix), so string comparison in SQL matches time order.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{ChannelRow, EntityRow, SolveRecordRow};
use crate::adapter::outbound::sqlite::database::schema::{
    entity_channels, solve_records, tracked_entities,
};
use crate::domain::{
    BindOutcome, ChannelId, SolveRecord, TrackedEntity, UnbindOutcome, Username,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{TickCommit, TrackingStore};

/// SQLite-backed tracking store.
///
/// Every mutation of one entity runs in a `BEGIN IMMEDIATE` transaction,
/// which serialises writers without a process-wide lock.
pub struct SqliteTrackingStore {
    pool: DbPool,
}

impl SqliteTrackingStore {
    /// Create a new SQLite tracking store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn encode_ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_ts(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("bad timestamp `{raw}`: {e}")))
}

fn entity_from_rows(row: EntityRow, channels: Vec<String>) -> Result<TrackedEntity> {
    let channels = channels
        .iter()
        .map(|id| ChannelId::parse(id))
        .collect::<std::result::Result<BTreeSet<_>, _>>()?;
    Ok(TrackedEntity::restore(
        Username::parse(&row.username)?,
        channels,
        row.active != 0,
        decode_ts(&row.watermark)?,
    ))
}

fn record_from_row(row: SolveRecordRow) -> Result<SolveRecord> {
    Ok(SolveRecord::restore(
        Username::parse(&row.username)?,
        row.problem_slug,
        row.title,
        decode_ts(&row.last_solved_at)?,
        u32::try_from(row.solve_count).unwrap_or(1),
    ))
}

fn record_to_row(record: &SolveRecord) -> SolveRecordRow {
    SolveRecordRow {
        username: record.username().as_str().to_string(),
        problem_slug: record.slug().to_string(),
        title: record.title().to_string(),
        last_solved_at: encode_ts(record.last_solved_at()),
        solve_count: i32::try_from(record.solve_count()).unwrap_or(i32::MAX),
    }
}

fn load_entity(conn: &mut SqliteConnection, username: &Username) -> Result<Option<TrackedEntity>> {
    let row: Option<EntityRow> = tracked_entities::table
        .find(username.as_str())
        .select(EntityRow::as_select())
        .first(conn)
        .optional()?;
    let Some(row) = row else {
        return Ok(None);
    };
    let channels: Vec<String> = entity_channels::table
        .filter(entity_channels::username.eq(username.as_str()))
        .order(entity_channels::channel_id.asc())
        .select(entity_channels::channel_id)
        .load(conn)?;
    entity_from_rows(row, channels).map(Some)
}

fn write_entity(conn: &mut SqliteConnection, entity: &TrackedEntity) -> Result<()> {
    let row = EntityRow {
        username: entity.username().as_str().to_string(),
        active: i32::from(entity.is_active()),
        watermark: encode_ts(entity.watermark()),
    };
    diesel::insert_into(tracked_entities::table)
        .values(&row)
        .on_conflict(tracked_entities::username)
        .do_update()
        .set((
            tracked_entities::active.eq(row.active),
            tracked_entities::watermark.eq(&row.watermark),
        ))
        .execute(conn)?;

    diesel::delete(entity_channels::table.filter(entity_channels::username.eq(&row.username)))
        .execute(conn)?;
    let channels: Vec<ChannelRow> = entity
        .channels()
        .iter()
        .map(|channel| ChannelRow {
            username: row.username.clone(),
            channel_id: channel.as_str().to_string(),
        })
        .collect();
    if !channels.is_empty() {
        diesel::insert_into(entity_channels::table)
            .values(&channels)
            .execute(conn)?;
    }
    Ok(())
}

fn advance_watermark_row(
    conn: &mut SqliteConnection,
    username: &Username,
    to: DateTime<Utc>,
) -> Result<bool> {
    let to = encode_ts(to);
    let updated = diesel::update(
        tracked_entities::table
            .filter(tracked_entities::username.eq(username.as_str()))
            .filter(tracked_entities::watermark.lt(&to)),
    )
    .set(tracked_entities::watermark.eq(&to))
    .execute(conn)?;
    Ok(updated > 0)
}

#[async_trait]
impl TrackingStore for SqliteTrackingStore {
    async fn find_active_entities(&self) -> Result<Vec<TrackedEntity>> {
        let mut conn = self.pool.get()?;

        let rows: Vec<EntityRow> = tracked_entities::table
            .filter(tracked_entities::active.eq(1))
            .order(tracked_entities::username.asc())
            .select(EntityRow::as_select())
            .load(&mut conn)?;
        let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
        let bindings: Vec<ChannelRow> = entity_channels::table
            .filter(entity_channels::username.eq_any(names))
            .order((entity_channels::username.asc(), entity_channels::channel_id.asc()))
            .select(ChannelRow::as_select())
            .load(&mut conn)?;

        let mut by_user: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for binding in bindings {
            by_user
                .entry(binding.username)
                .or_default()
                .push(binding.channel_id);
        }

        rows.into_iter()
            .map(|row| {
                let channels = by_user.remove(&row.username).unwrap_or_default();
                entity_from_rows(row, channels)
            })
            .collect()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<TrackedEntity>> {
        let mut conn = self.pool.get()?;
        load_entity(&mut conn, username)
    }

    async fn save(&self, entity: &TrackedEntity) -> Result<()> {
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| write_entity(conn, entity))
    }

    async fn find_solve_record(
        &self,
        username: &Username,
        slug: &str,
    ) -> Result<Option<SolveRecord>> {
        let mut conn = self.pool.get()?;
        let row: Option<SolveRecordRow> = solve_records::table
            .find((username.as_str(), slug))
            .select(SolveRecordRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(record_from_row).transpose()
    }

    async fn save_solve_record(&self, record: &SolveRecord) -> Result<()> {
        let mut conn = self.pool.get()?;
        diesel::replace_into(solve_records::table)
            .values(&record_to_row(record))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn increment_solve_record(
        &self,
        username: &Username,
        slug: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<SolveRecord>> {
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| {
            let updated = diesel::update(solve_records::table.find((username.as_str(), slug)))
                .set((
                    solve_records::solve_count.eq(solve_records::solve_count + 1),
                    solve_records::last_solved_at.eq(encode_ts(at)),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Ok(None);
            }
            let row: SolveRecordRow = solve_records::table
                .find((username.as_str(), slug))
                .select(SolveRecordRow::as_select())
                .first(conn)?;
            record_from_row(row).map(Some)
        })
    }

    async fn list_solve_records_in_range(
        &self,
        username: &Username,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SolveRecord>> {
        let mut conn = self.pool.get()?;
        let rows: Vec<SolveRecordRow> = solve_records::table
            .filter(solve_records::username.eq(username.as_str()))
            .filter(solve_records::last_solved_at.ge(encode_ts(start)))
            .filter(solve_records::last_solved_at.lt(encode_ts(end)))
            .order((
                solve_records::last_solved_at.asc(),
                solve_records::problem_slug.asc(),
            ))
            .select(SolveRecordRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(record_from_row).collect()
    }

    async fn bind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
        now: DateTime<Utc>,
    ) -> Result<BindOutcome> {
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| {
            let (entity, outcome) = match load_entity(conn, username)? {
                Some(mut entity) => {
                    let outcome = entity.bind(channel.clone(), now);
                    (entity, outcome)
                }
                None => (
                    TrackedEntity::new(username.clone(), channel.clone(), now),
                    BindOutcome::Created,
                ),
            };
            if outcome.started_tracking() {
                write_entity(conn, &entity)?;
            }
            Ok(outcome)
        })
    }

    async fn unbind_channel(
        &self,
        username: &Username,
        channel: &ChannelId,
    ) -> Result<UnbindOutcome> {
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| {
            let Some(mut entity) = load_entity(conn, username)? else {
                return Ok(UnbindOutcome::NotBound);
            };
            let outcome = entity.unbind(channel);
            if outcome != UnbindOutcome::NotBound {
                write_entity(conn, &entity)?;
            }
            Ok(outcome)
        })
    }

    async fn advance_watermark(&self, username: &Username, to: DateTime<Utc>) -> Result<bool> {
        let mut conn = self.pool.get()?;
        advance_watermark_row(&mut conn, username, to)
    }

    async fn commit_tick(&self, commit: &TickCommit) -> Result<()> {
        let mut conn = self.pool.get()?;
        let rows: Vec<SolveRecordRow> = commit.records.iter().map(record_to_row).collect();
        conn.immediate_transaction(|conn| {
            for row in &rows {
                diesel::replace_into(solve_records::table)
                    .values(row)
                    .execute(conn)?;
            }
            advance_watermark_row(conn, &commit.username, commit.watermark)?;
            Ok(())
        })
    }
}
