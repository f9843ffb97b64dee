//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate. They panic on invalid input.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{ChannelId, SubmissionEvent, Username};

/// Create a [`Username`] from a string.
pub fn user(name: &str) -> Username {
    Username::parse(name).expect("valid test username")
}

/// Create a [`ChannelId`] from a string.
pub fn channel(id: &str) -> ChannelId {
    ChannelId::parse(id).expect("valid test channel")
}

/// A UTC instant.
pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid test instant")
}

/// An accepted submission whose title is derived from the slug
/// (`two-sum` becomes `Two Sum`).
pub fn event(id: &str, slug: &str, at: DateTime<Utc>) -> SubmissionEvent {
    SubmissionEvent::new(id, title_of(slug), slug, at.timestamp())
}

fn title_of(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_title_comes_from_slug() {
        let e = event("1", "two-sum", at(2024, 1, 1, 0, 0, 0));
        assert_eq!(e.title, "Two Sum");
        assert_eq!(e.slug, "two-sum");
    }
}
