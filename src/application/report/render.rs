//! Leaderboard rendering.

use crate::domain::{DailyReport, Difficulty, Standing};
use crate::port::outbound::notifier::{Block, Notification};

/// Split lines into newline-joined chunks of at most `max_chars` characters.
///
/// Lines are never split across chunks; a single line longer than the
/// limit is truncated with a trailing ellipsis.
#[must_use]
pub fn split_into_chunks(lines: &[String], max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in lines {
        let line = truncate(line, max_chars);
        let line_len = line.chars().count();
        if current_len > 0 && current_len + 1 + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(&line);
        current_len += line_len;
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

fn truncate(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn problems(count: usize) -> String {
    if count == 1 {
        "1 problem".to_string()
    } else {
        format!("{count} problems")
    }
}

fn chunked_fields(mut block: Block, name: &str, lines: &[String], max_chars: usize) -> Block {
    for (i, chunk) in split_into_chunks(lines, max_chars).into_iter().enumerate() {
        let name = if i == 0 {
            name.to_string()
        } else {
            format!("{name} (continued)")
        };
        block = block.field(name, chunk);
    }
    block
}

fn leaderboard(report: &DailyReport, max_chars: usize) -> Block {
    let mut block = Block::new(format!("🏆 Daily LeetCode Champions - {}", report.date()));
    if let Some(champion) = report.champion() {
        block = block.field(
            "👑 King of LeetCode Day",
            format!("{} with {} solved!", champion.username, problems(champion.total())),
        );
    }
    let lines: Vec<String> = report
        .standings()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}: {}", i + 1, s.username, problems(s.total())))
        .collect();
    chunked_fields(block, "📊 Leaderboard", &lines, max_chars)
}

fn details(standing: &Standing, max_chars: usize) -> Block {
    let breakdown = standing.breakdown();
    let by_difficulty = Difficulty::ALL
        .iter()
        .map(|d| format!("{d}: {}", breakdown.get(*d)))
        .collect::<Vec<_>>()
        .join("\n");

    let lines: Vec<String> = standing
        .problems
        .iter()
        .map(|p| {
            let label = p.difficulty.map_or("Unknown", Difficulty::label);
            format!("- {} ({label})", p.title)
        })
        .collect();

    let block = Block::new(format!("📝 {}'s Solutions", standing.username))
        .field("By Difficulty", by_difficulty);
    chunked_fields(block, "Problems Solved", &lines, max_chars)
}

/// Render the leaderboard block followed by one detail block per entity,
/// in rank order.
#[must_use]
pub fn render_report(report: &DailyReport, max_chars: usize) -> Notification {
    let mut blocks = vec![leaderboard(report, max_chars)];
    blocks.extend(report.standings().iter().map(|s| details(s, max_chars)));
    Notification::bundle(blocks)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{SolvedProblem, Username};

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn chunks_respect_limit() {
        let items: Vec<String> = (0..50).map(|i| format!("- Problem number {i} (Easy)")).collect();

        let chunks = split_into_chunks(&items, 100);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split('\n')).collect();
        assert_eq!(rejoined.len(), 50);
    }

    #[test]
    fn overlong_line_is_truncated() {
        let long = "x".repeat(50);
        let chunks = split_into_chunks(&lines(&["short", &long]), 10);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "short");
        assert_eq!(chunks[1].chars().count(), 10);
        assert!(chunks[1].ends_with('…'));
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert!(split_into_chunks(&[], 1024).is_empty());
    }

    #[test]
    fn exact_fit_stays_in_one_chunk() {
        let chunks = split_into_chunks(&lines(&["abcd", "efgh"]), 9);
        assert_eq!(chunks, ["abcd\nefgh"]);
    }

    #[test]
    fn report_has_leaderboard_then_details() {
        let report = DailyReport::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            vec![Standing {
                username: Username::parse("alice").unwrap(),
                problems: vec![
                    SolvedProblem {
                        slug: "two-sum".into(),
                        title: "Two Sum".into(),
                        difficulty: Some(Difficulty::Easy),
                    },
                    SolvedProblem {
                        slug: "mystery".into(),
                        title: "Mystery".into(),
                        difficulty: None,
                    },
                ],
            }],
        );

        let notification = render_report(&report, 1024);

        assert_eq!(notification.blocks.len(), 2);
        let board = &notification.blocks[0];
        assert_eq!(board.title, "🏆 Daily LeetCode Champions - 2024-06-01");
        assert_eq!(board.fields[0].value, "alice with 2 problems solved!");
        assert_eq!(board.fields[1].value, "1. alice: 2 problems");

        let detail = &notification.blocks[1];
        assert_eq!(detail.title, "📝 alice's Solutions");
        assert_eq!(detail.fields[0].value, "Easy: 1\nMedium: 0\nHard: 0");
        assert_eq!(detail.fields[1].name, "Problems Solved");
        assert_eq!(detail.fields[1].value, "- Two Sum (Easy)\n- Mystery (Unknown)");
    }
}
