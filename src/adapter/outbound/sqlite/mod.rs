//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`SqliteTrackingStore`] using Diesel ORM.

pub mod database;
mod store;

pub use store::SqliteTrackingStore;
