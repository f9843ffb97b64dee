//! Domain types for tracking solves.
//!
//! Pure data and rules: no I/O, no async. Everything here is shared by the
//! application services and the adapters.

pub mod difficulty;
pub mod entity;
pub mod error;
pub mod id;
pub mod report;
pub mod solve;
pub mod submission;

pub use difficulty::{Difficulty, DifficultyBreakdown};
pub use entity::{BindOutcome, TrackedEntity, UnbindOutcome};
pub use error::DomainError;
pub use id::{ChannelId, ScopeId, Username};
pub use report::{DailyReport, SolvedProblem, Standing};
pub use solve::{SolveOutcome, SolveRecord};
pub use submission::SubmissionEvent;
