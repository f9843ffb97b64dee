//! Solve announcement rendering.

use crate::domain::{SolveOutcome, SubmissionEvent, Username};
use crate::port::outbound::notifier::{Block, Notification};

const PROBLEM_BASE_URL: &str = "https://leetcode.com/problems";

/// Public URL of a problem.
#[must_use]
pub fn problem_url(slug: &str) -> String {
    format!("{PROBLEM_BASE_URL}/{slug}/")
}

/// Render the announcement for one newly observed solve.
#[must_use]
pub fn render_solve(
    username: &Username,
    event: &SubmissionEvent,
    outcome: SolveOutcome,
) -> Notification {
    let block = match outcome {
        SolveOutcome::Solved => Block::new(format!(
            "🎉 {username} has successfully solved {}!",
            event.title
        )),
        SolveOutcome::Resolved { count } => Block::new(format!(
            "🎉 {username} has successfully re-solved {}! (Re-solved! 🔄)",
            event.title
        ))
        .field("Times solved", count.to_string()),
    };
    Notification::single(block.description(format!("Problem Link: {}", problem_url(&event.slug))))
}
