//! Daily leaderboard model.

use chrono::NaiveDate;

use super::difficulty::{Difficulty, DifficultyBreakdown};
use super::id::Username;

/// A problem an entity solved during the report day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedProblem {
    pub slug: String,
    pub title: String,
    /// `None` when the difficulty lookup failed.
    pub difficulty: Option<Difficulty>,
}

/// One entity's line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub username: Username,
    pub problems: Vec<SolvedProblem>,
}

impl Standing {
    /// Number of distinct problems solved in the window.
    #[must_use]
    pub fn total(&self) -> usize {
        self.problems.len()
    }

    /// Counts per difficulty class. Problems with an unknown difficulty are
    /// left out here but still count in [`Standing::total`].
    #[must_use]
    pub fn breakdown(&self) -> DifficultyBreakdown {
        let mut breakdown = DifficultyBreakdown::default();
        for difficulty in self.problems.iter().filter_map(|p| p.difficulty) {
            breakdown.record(difficulty);
        }
        breakdown
    }
}

/// Ranked standings for one local day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    date: NaiveDate,
    standings: Vec<Standing>,
}

impl DailyReport {
    /// Build a report, dropping empty standings and ranking the rest by
    /// total descending, then username ascending.
    #[must_use]
    pub fn new(date: NaiveDate, standings: Vec<Standing>) -> Self {
        let mut standings: Vec<Standing> =
            standings.into_iter().filter(|s| s.total() > 0).collect();
        standings.sort_by(|a, b| {
            b.total()
                .cmp(&a.total())
                .then_with(|| a.username.cmp(&b.username))
        });
        Self { date, standings }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Standings in rank order.
    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// The top-ranked entity, if anyone solved anything.
    #[must_use]
    pub fn champion(&self) -> Option<&Standing> {
        self.standings.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
