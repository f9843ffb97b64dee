//! solvewatch - LeetCode solve announcements and daily leaderboards.
//!
//! Polls the public LeetCode API for the accounts chat members ask to track,
//! announces each newly accepted problem to every channel tracking that
//! account, and posts a ranked leaderboard of the day's solves once a day.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Tracked entities, solve records, daily reports. No I/O.
//! - [`port`] - Traits at the seams: submission source, tracking store,
//!   notification sink, difficulty resolver, clock, channel directory.
//! - [`application`] - The reconcile tick, tracking commands, the daily
//!   aggregator and the two schedulers.
//! - [`adapter`] - LeetCode GraphQL client, SQLite and in-memory stores,
//!   Telegram delivery and commands, the CLI.
//! - [`infrastructure`] - Configuration, wiring, process lifecycle.
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and bot commands
//! - `testkit` - Scripted fakes for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
