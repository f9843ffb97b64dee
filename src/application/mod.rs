//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod reconcile;
pub mod report;
pub mod schedule;
pub mod tracking;
