mod harness;

use chrono::NaiveDate;

use harness::Harness;
use solvewatch::application::report::ReportRun;
use solvewatch::domain::{Difficulty, SolveRecord, Username};
use solvewatch::port::inbound::tracking::TrackingCommands;
use solvewatch::testkit::domain::{at, channel, user};
use solvewatch::testkit::StaticDifficulty;

fn report_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn difficulties() -> StaticDifficulty {
    StaticDifficulty::new()
        .with("two-sum", Difficulty::Easy)
        .with("add-two-numbers", Difficulty::Medium)
        .with("median-of-two-sorted-arrays", Difficulty::Hard)
        .with("valid-parentheses", Difficulty::Easy)
}

async fn solved(
    h: &Harness,
    who: &Username,
    slug: &str,
    title: &str,
    when: chrono::DateTime<chrono::Utc>,
) {
    h.store
        .save_solve_record(&SolveRecord::first(who.clone(), slug, title, when))
        .await
        .unwrap();
}

#[tokio::test]
async fn leaderboard_ranks_by_total_then_name() {
    let h = Harness::with_difficulty(difficulties());
    let (alice, bob, carol) = (user("alice"), user("bob"), user("carol"));
    for who in [&alice, &bob, &carol] {
        h.tracking.track(who, &channel("1")).await.unwrap();
    }
    let noon = at(2024, 3, 10, 11, 0, 0);
    solved(&h, &bob, "two-sum", "Two Sum", noon).await;
    solved(&h, &bob, "add-two-numbers", "Add Two Numbers", noon).await;
    solved(&h, &alice, "two-sum", "Two Sum", noon).await;
    solved(&h, &alice, "valid-parentheses", "Valid Parentheses", noon).await;
    let median = "Median of Two Sorted Arrays";
    solved(&h, &carol, "median-of-two-sorted-arrays", median, noon).await;

    let run = h.aggregator.run(report_day()).await.unwrap();

    assert_eq!(run, ReportRun::Sent { entities: 3, channels: 1 });
    let sent = h.sink.sent_to(&channel("1"));
    assert_eq!(sent.len(), 1);
    let board = &sent[0].blocks[0];
    assert_eq!(board.title, "🏆 Daily LeetCode Champions - 2024-03-10");
    assert_eq!(board.fields[0].name, "👑 King of LeetCode Day");
    assert_eq!(board.fields[0].value, "alice with 2 problems solved!");
    assert_eq!(
        board.fields[1].value,
        "1. alice: 2 problems\n2. bob: 2 problems\n3. carol: 1 problem"
    );

    let details: Vec<&str> = sent[0].blocks[1..].iter().map(|b| b.title.as_str()).collect();
    assert_eq!(
        details,
        vec![
            "📝 alice's Solutions",
            "📝 bob's Solutions",
            "📝 carol's Solutions"
        ]
    );
    assert_eq!(sent[0].blocks[2].fields[0].value, "Easy: 1\nMedium: 1\nHard: 0");
}

#[tokio::test]
async fn report_goes_to_every_bound_channel_once() {
    let h = Harness::with_difficulty(difficulties());
    let (alice, bob) = (user("alice"), user("bob"));
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    h.tracking.track(&alice, &channel("2")).await.unwrap();
    h.tracking.track(&bob, &channel("2")).await.unwrap();
    h.tracking.track(&bob, &channel("3")).await.unwrap();
    solved(&h, &alice, "two-sum", "Two Sum", at(2024, 3, 10, 12, 0, 0)).await;

    let run = h.aggregator.run(report_day()).await.unwrap();

    assert_eq!(run, ReportRun::Sent { entities: 1, channels: 3 });
    for id in ["1", "2", "3"] {
        assert_eq!(h.sink.sent_to(&channel(id)).len(), 1, "channel {id}");
    }
}

#[tokio::test]
async fn quiet_day_sends_nothing() {
    let h = Harness::with_difficulty(difficulties());
    let alice = user("alice");
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    solved(&h, &alice, "two-sum", "Two Sum", at(2024, 3, 8, 12, 0, 0)).await;

    let run = h.aggregator.run(report_day()).await.unwrap();

    assert_eq!(run, ReportRun::Skipped);
    assert_eq!(h.sink.count(), 0);
}

#[tokio::test]
async fn unknown_difficulty_is_listed_but_not_counted() {
    let h = Harness::with_difficulty(difficulties());
    let alice = user("alice");
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    let noon = at(2024, 3, 10, 11, 0, 0);
    solved(&h, &alice, "two-sum", "Two Sum", noon).await;
    solved(&h, &alice, "secret-problem", "Secret Problem", noon).await;

    let report = h.aggregator.build_report(report_day()).await.unwrap();

    let standing = &report.standings()[0];
    assert_eq!(standing.total(), 2);
    let breakdown = standing.breakdown();
    assert_eq!(breakdown.get(Difficulty::Easy), 1);
    assert_eq!(breakdown.get(Difficulty::Medium), 0);
    assert_eq!(breakdown.get(Difficulty::Hard), 0);

    h.aggregator.run(report_day()).await.unwrap();
    let detail = &h.sink.sent_to(&channel("1"))[0].blocks[1];
    assert!(detail.fields[1].value.contains("- Secret Problem (Unknown)"));
}

#[tokio::test]
async fn window_follows_local_midnight() {
    let h = Harness::with_difficulty(difficulties());
    let alice = user("alice");
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    // Warsaw is UTC+1 in early March: the day is [09T23:00Z, 10T23:00Z).
    solved(&h, &alice, "two-sum", "Two Sum", at(2024, 3, 9, 23, 0, 0)).await;
    let (last, after) = (at(2024, 3, 10, 22, 59, 59), at(2024, 3, 10, 23, 0, 0));
    solved(&h, &alice, "valid-parentheses", "Valid Parentheses", last).await;
    solved(&h, &alice, "add-two-numbers", "Add Two Numbers", after).await;
    let before = at(2024, 3, 9, 22, 59, 59);
    solved(&h, &alice, "median-of-two-sorted-arrays", "Median", before).await;

    let report = h.aggregator.build_report(report_day()).await.unwrap();

    let mut slugs: Vec<&str> = report.standings()[0]
        .problems
        .iter()
        .map(|p| p.slug.as_str())
        .collect();
    slugs.sort_unstable();
    assert_eq!(slugs, vec!["two-sum", "valid-parentheses"]);
}

#[tokio::test]
async fn untracked_users_are_left_out() {
    let h = Harness::with_difficulty(difficulties());
    let (alice, bob) = (user("alice"), user("bob"));
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    h.tracking.track(&bob, &channel("2")).await.unwrap();
    let noon = at(2024, 3, 10, 11, 0, 0);
    solved(&h, &alice, "two-sum", "Two Sum", noon).await;
    solved(&h, &bob, "two-sum", "Two Sum", noon).await;
    h.tracking.untrack(&bob, &channel("2")).await.unwrap();

    let run = h.aggregator.run(report_day()).await.unwrap();

    assert_eq!(run, ReportRun::Sent { entities: 1, channels: 1 });
    assert!(h.sink.sent_to(&channel("2")).is_empty());
}

#[tokio::test]
async fn long_problem_lists_are_split_into_continued_fields() {
    let mut table = StaticDifficulty::new();
    let slugs: Vec<String> = (0..40).map(|i| format!("problem-number-{i}")).collect();
    for slug in &slugs {
        table = table.with(slug, Difficulty::Medium);
    }
    let h = Harness::with_difficulty(table);
    let alice = user("alice");
    h.tracking.track(&alice, &channel("1")).await.unwrap();
    for slug in &slugs {
        let title = format!("Problem Number With A Long Title {slug}");
        solved(&h, &alice, slug, &title, at(2024, 3, 10, 11, 0, 0)).await;
    }

    h.aggregator.run(report_day()).await.unwrap();

    let detail = &h.sink.sent_to(&channel("1"))[0].blocks[1];
    let names: Vec<&str> = detail.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names[1], "Problems Solved");
    assert!(names[2..].iter().all(|n| *n == "Problems Solved (continued)"));
    assert!(detail.fields.iter().all(|f| f.value.chars().count() <= 1024));
    assert_eq!(detail.fields[0].value, "Easy: 0\nMedium: 40\nHard: 0");
}
