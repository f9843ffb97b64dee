//! Outbound adapters (driven side).

pub mod leetcode;
pub mod memory;
pub mod notifier;
pub mod sqlite;
