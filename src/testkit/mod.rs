//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - `ScriptedSource`, a submission source with per-user
//!   scripted responses and failures.
//! - [`sink`] - `RecordingSink`, captures every notification sent.
//! - [`clock`] - `ManualClock`, a clock tests move by hand.
//! - [`difficulty`] - `StaticDifficulty`, a fixed slug-to-difficulty table.
//! - [`domain`] - Builders for usernames, channels, events and instants.

pub mod clock;
pub mod difficulty;
pub mod domain;
pub mod sink;
pub mod source;

pub use clock::ManualClock;
pub use difficulty::StaticDifficulty;
pub use sink::RecordingSink;
pub use source::ScriptedSource;
