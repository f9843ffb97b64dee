//! SQLite store behaviour against a real database file.

mod harness;

use std::collections::BTreeSet;

use chrono::Duration as Span;

use harness::temp_db::TempDb;
use harness::{t0, Harness};
use solvewatch::domain::{BindOutcome, SolveRecord, TrackedEntity, UnbindOutcome};
use solvewatch::port::inbound::tracking::TrackingCommands;
use solvewatch::port::outbound::store::{TickCommit, TrackingStore};
use solvewatch::testkit::domain::{at, channel, event, user};

#[tokio::test]
async fn bind_unbind_and_reactivate() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");

    assert_eq!(
        store.bind_channel(&alice, &channel("1"), t0()).await.unwrap(),
        BindOutcome::Created
    );
    assert_eq!(
        store.bind_channel(&alice, &channel("2"), t0()).await.unwrap(),
        BindOutcome::Added
    );
    assert_eq!(
        store.bind_channel(&alice, &channel("2"), t0()).await.unwrap(),
        BindOutcome::AlreadyBound
    );

    assert_eq!(
        store.unbind_channel(&alice, &channel("1")).await.unwrap(),
        UnbindOutcome::Removed { deactivated: false }
    );
    assert_eq!(
        store.unbind_channel(&alice, &channel("2")).await.unwrap(),
        UnbindOutcome::Removed { deactivated: true }
    );
    assert_eq!(
        store.unbind_channel(&alice, &channel("2")).await.unwrap(),
        UnbindOutcome::NotBound
    );
    assert!(store.find_active_entities().await.unwrap().is_empty());

    let later = t0() + Span::days(2);
    assert_eq!(
        store.bind_channel(&alice, &channel("3"), later).await.unwrap(),
        BindOutcome::Reactivated
    );
    let entity = store.find_by_username(&alice).await.unwrap().unwrap();
    assert!(entity.is_active());
    assert_eq!(entity.watermark(), later);
    assert_eq!(
        entity.channels().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        vec!["3"]
    );
}

#[tokio::test]
async fn unknown_user_cannot_be_unbound() {
    let db = TempDb::create();
    let store = db.store();

    assert_eq!(
        store
            .unbind_channel(&user("ghost"), &channel("1"))
            .await
            .unwrap(),
        UnbindOutcome::NotBound
    );
    assert!(store.find_by_username(&user("ghost")).await.unwrap().is_none());
}

#[tokio::test]
async fn save_upserts_entity_and_replaces_channels() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");

    let created = TrackedEntity::restore(
        alice.clone(),
        BTreeSet::from([channel("1"), channel("2")]),
        true,
        t0(),
    );
    store.save(&created).await.unwrap();
    assert_eq!(store.find_by_username(&alice).await.unwrap(), Some(created));

    let later = t0() + Span::hours(3);
    let replaced = TrackedEntity::restore(
        alice.clone(),
        BTreeSet::from([channel("2"), channel("3")]),
        true,
        later,
    );
    store.save(&replaced).await.unwrap();

    let entity = store.find_by_username(&alice).await.unwrap().unwrap();
    assert_eq!(entity, replaced);
    assert_eq!(
        entity.channels().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        vec!["2", "3"]
    );
    assert_eq!(store.find_active_entities().await.unwrap().len(), 1);
}

#[tokio::test]
async fn save_keeps_inactive_entity_without_channels() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");
    store.bind_channel(&alice, &channel("1"), t0()).await.unwrap();

    let inactive = TrackedEntity::restore(alice.clone(), BTreeSet::new(), false, t0());
    store.save(&inactive).await.unwrap();

    let entity = store.find_by_username(&alice).await.unwrap().unwrap();
    assert!(!entity.is_active());
    assert!(entity.channels().is_empty());
    assert_eq!(entity.watermark(), t0());
    assert!(store.find_active_entities().await.unwrap().is_empty());
}

#[tokio::test]
async fn solve_records_save_find_and_increment() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");

    assert!(store
        .increment_solve_record(&alice, "two-sum", t0())
        .await
        .unwrap()
        .is_none());

    store
        .save_solve_record(&SolveRecord::first(alice.clone(), "two-sum", "Two Sum", t0()))
        .await
        .unwrap();
    let later = t0() + Span::hours(3);
    let bumped = store
        .increment_solve_record(&alice, "two-sum", later)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(bumped.solve_count(), 2);
    assert_eq!(bumped.last_solved_at(), later);
    assert_eq!(
        store.find_solve_record(&alice, "two-sum").await.unwrap(),
        Some(bumped)
    );
    assert!(store
        .find_solve_record(&user("bob"), "two-sum")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn range_is_half_open() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");
    let start = at(2024, 3, 9, 23, 0, 0);
    let end = at(2024, 3, 10, 23, 0, 0);

    for (slug, when) in [
        ("before", start - Span::microseconds(1)),
        ("at-start", start),
        ("inside", start + Span::hours(5)),
        ("at-end", end),
    ] {
        store
            .save_solve_record(&SolveRecord::first(alice.clone(), slug, slug, when))
            .await
            .unwrap();
    }

    let found = store
        .list_solve_records_in_range(&alice, start, end)
        .await
        .unwrap();

    let slugs: Vec<&str> = found.iter().map(SolveRecord::slug).collect();
    assert_eq!(slugs, vec!["at-start", "inside"]);
}

#[tokio::test]
async fn commit_tick_writes_records_and_keeps_watermark_monotonic() {
    let db = TempDb::create();
    let store = db.store();
    let alice = user("alice");
    store.bind_channel(&alice, &channel("1"), t0()).await.unwrap();

    let ahead = t0() + Span::minutes(10);
    store
        .commit_tick(&TickCommit {
            username: alice.clone(),
            records: vec![SolveRecord::first(alice.clone(), "two-sum", "Two Sum", ahead)],
            watermark: ahead,
        })
        .await
        .unwrap();

    store
        .commit_tick(&TickCommit {
            username: alice.clone(),
            records: vec![],
            watermark: t0() + Span::minutes(5),
        })
        .await
        .unwrap();

    let entity = store.find_by_username(&alice).await.unwrap().unwrap();
    assert_eq!(entity.watermark(), ahead);
    assert!(store
        .find_solve_record(&alice, "two-sum")
        .await
        .unwrap()
        .is_some());

    assert!(!store.advance_watermark(&alice, t0()).await.unwrap());
    assert!(store
        .advance_watermark(&alice, ahead + Span::seconds(1))
        .await
        .unwrap());
}

#[tokio::test]
async fn state_survives_reopen() {
    let db = TempDb::create();
    let alice = user("alice");
    {
        let store = db.store();
        store.bind_channel(&alice, &channel("-100"), t0()).await.unwrap();
        store
            .save_solve_record(&SolveRecord::first(alice.clone(), "two-sum", "Two Sum", t0()))
            .await
            .unwrap();
    }

    let store = db.store();
    let active = store.find_active_entities().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].username(), &alice);
    assert!(active[0].is_bound(&channel("-100")));
    assert_eq!(active[0].watermark(), t0());
    assert_eq!(
        store
            .find_solve_record(&alice, "two-sum")
            .await
            .unwrap()
            .map(|r| r.solve_count()),
        Some(1)
    );
    assert!(db.path().exists());
}

#[tokio::test]
async fn full_flow_over_sqlite() {
    let db = TempDb::create();
    let h = Harness::with_store(db.store());
    let alice = user("alice");
    h.tracking.track(&alice, &channel("1")).await.unwrap();

    h.source.set_recent(
        &alice,
        vec![
            event("1", "two-sum", t0() + Span::minutes(1)),
            event("2", "two-sum", t0() + Span::minutes(2)),
        ],
    );
    h.clock.advance(Span::minutes(3));
    h.reconciler.reconcile(&alice).await.unwrap();
    h.reconciler.reconcile(&alice).await.unwrap();

    assert_eq!(h.sink.count(), 2);
    let record = h
        .store
        .find_solve_record(&alice, "two-sum")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.solve_count(), 2);
    assert_eq!(record.last_solved_at(), t0() + Span::minutes(3));
}
