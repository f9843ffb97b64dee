//! SQLite database modules.
//!
//! Provides connection pooling, the schema, and Diesel row types.

pub mod connection;
pub mod model;
pub mod schema;
