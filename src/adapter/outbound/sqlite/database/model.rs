//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{entity_channels, solve_records, tracked_entities};

/// Database row for a tracked entity.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = tracked_entities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntityRow {
    pub username: String,
    /// 1 when active, 0 otherwise.
    pub active: i32,
    pub watermark: String,
}

/// Database row binding a channel to an entity.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = entity_channels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChannelRow {
    pub username: String,
    pub channel_id: String,
}

/// Database row for a solve record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = solve_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SolveRecordRow {
    pub username: String,
    pub problem_slug: String,
    pub title: String,
    pub last_solved_at: String,
    pub solve_count: i32,
}
