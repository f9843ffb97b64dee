//! Per-problem solve history.

use chrono::{DateTime, Utc};

use super::id::Username;

/// How a newly observed event relates to the entity's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// First observed solve of this problem.
    Solved,
    /// The problem had been solved before; `count` is the new total.
    Resolved { count: u32 },
}

impl SolveOutcome {
    #[must_use]
    pub const fn is_resolve(self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// History of one entity solving one problem, keyed by `(username, slug)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRecord {
    username: Username,
    slug: String,
    title: String,
    last_solved_at: DateTime<Utc>,
    solve_count: u32,
}

impl SolveRecord {
    /// Record for the first observed solve.
    #[must_use]
    pub fn first(
        username: Username,
        slug: impl Into<String>,
        title: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            slug: slug.into(),
            title: title.into(),
            last_solved_at: at,
            solve_count: 1,
        }
    }

    /// Rebuild a record from persisted state.
    #[must_use]
    pub fn restore(
        username: Username,
        slug: String,
        title: String,
        last_solved_at: DateTime<Utc>,
        solve_count: u32,
    ) -> Self {
        Self {
            username,
            slug,
            title,
            last_solved_at,
            solve_count: solve_count.max(1),
        }
    }

    /// Count another solve. The title is refreshed in case the source
    /// renamed the problem.
    pub fn record_again(&mut self, title: &str, at: DateTime<Utc>) -> SolveOutcome {
        self.solve_count = self.solve_count.saturating_add(1);
        self.last_solved_at = at;
        if !title.is_empty() && title != self.title {
            self.title = title.to_string();
        }
        SolveOutcome::Resolved {
            count: self.solve_count,
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn last_solved_at(&self) -> DateTime<Utc> {
        self.last_solved_at
    }

    #[must_use]
    pub const fn solve_count(&self) -> u32 {
        self.solve_count
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn record_again_bumps_count_and_timestamp() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let later = t0 + Duration::hours(2);
        let mut record =
            SolveRecord::first(Username::parse("bob").unwrap(), "two-sum", "Two Sum", t0);

        let outcome = record.record_again("Two Sum", later);

        assert_eq!(outcome, SolveOutcome::Resolved { count: 2 });
        assert_eq!(record.solve_count(), 2);
        assert_eq!(record.last_solved_at(), later);
    }

    #[test]
    fn restore_clamps_count_to_one() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let record = SolveRecord::restore(
            Username::parse("bob").unwrap(),
            "two-sum".into(),
            "Two Sum".into(),
            t0,
            0,
        );
        assert_eq!(record.solve_count(), 1);
    }
}
