//! Accepted submissions as reported by the source.

use chrono::{DateTime, Utc};

/// One accepted submission observed on the source.
///
/// Ephemeral: produced by a fetch, consumed by a single reconcile tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEvent {
    /// Source-assigned submission id.
    pub id: String,
    /// Problem title.
    pub title: String,
    /// Problem slug, the stable key of a problem.
    pub slug: String,
    /// Submission time in seconds since the Unix epoch.
    pub timestamp: i64,
}

impl SubmissionEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            timestamp,
        }
    }

    /// Submission time as a UTC instant, or `None` when out of range.
    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// True when the submission happened strictly after `watermark`.
    #[must_use]
    pub fn is_after(&self, watermark: DateTime<Utc>) -> bool {
        self.submitted_at().is_some_and(|at| at > watermark)
    }
}
