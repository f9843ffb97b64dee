//! Submission source port.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{SubmissionEvent, Username};

/// Transient failures of a source call. A failed call leaves every piece
/// of tracking state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The source answered with a structured error payload.
    #[error("source api error: {0}")]
    Api(String),

    /// The call did not finish within the configured budget.
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be understood.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Fetches recent accepted submissions for one username.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Recent accepted submissions, newest first as returned by the source.
    ///
    /// The list is bounded by the source; submissions older than the bound
    /// are not visible. No retries happen inside the call.
    async fn fetch_recent(&self, username: &Username)
        -> Result<Vec<SubmissionEvent>, SourceError>;
}
