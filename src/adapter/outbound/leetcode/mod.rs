//! LeetCode GraphQL adapter.
//!
//! Implements [`SubmissionSource`](crate::port::outbound::source::SubmissionSource)
//! and [`DifficultyResolver`](crate::port::outbound::difficulty::DifficultyResolver)
//! against the public GraphQL endpoint.

mod cache;
mod client;
mod dto;
pub mod settings;

pub use cache::CachingResolver;
pub use client::LeetCodeClient;
pub use settings::{LeetCodeConfig, LeetCodeCredentials};
