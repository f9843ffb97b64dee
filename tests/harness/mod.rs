//! Shared wiring for integration tests.

#![allow(dead_code)]

pub mod failing_store;
pub mod temp_db;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use solvewatch::adapter::outbound::memory::MemoryTrackingStore;
use solvewatch::application::reconcile::Reconciler;
use solvewatch::application::report::DailyAggregator;
use solvewatch::application::schedule::PollingScheduler;
use solvewatch::application::tracking::TrackingService;
use solvewatch::port::outbound::directory::FlatChannelDirectory;
use solvewatch::port::outbound::store::TrackingStore;
use solvewatch::testkit::domain::at;
use solvewatch::testkit::{ManualClock, RecordingSink, ScriptedSource, StaticDifficulty};

pub const WARSAW: Tz = chrono_tz::Europe::Warsaw;

/// 2024-03-10 10:00 UTC (11:00 in Warsaw).
pub fn t0() -> DateTime<Utc> {
    at(2024, 3, 10, 10, 0, 0)
}

/// Every service wired over scripted fakes.
pub struct Harness {
    pub store: Arc<dyn TrackingStore>,
    pub source: Arc<ScriptedSource>,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<ManualClock>,
    pub difficulty: Arc<StaticDifficulty>,
    pub reconciler: Arc<Reconciler>,
    pub tracking: TrackingService,
    pub aggregator: DailyAggregator,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(
            Arc::new(MemoryTrackingStore::new()),
            StaticDifficulty::new(),
        )
    }

    pub fn with_store(store: Arc<dyn TrackingStore>) -> Self {
        Self::build(store, StaticDifficulty::new())
    }

    pub fn with_difficulty(difficulty: StaticDifficulty) -> Self {
        Self::build(Arc::new(MemoryTrackingStore::new()), difficulty)
    }

    pub fn build(store: Arc<dyn TrackingStore>, difficulty: StaticDifficulty) -> Self {
        let source = Arc::new(ScriptedSource::new());
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let difficulty = Arc::new(difficulty);

        let reconciler = Arc::new(Reconciler::new(
            source.clone(),
            store.clone(),
            sink.clone(),
            clock.clone(),
        ));
        let tracking = TrackingService::new(
            store.clone(),
            reconciler.clone(),
            Arc::new(FlatChannelDirectory),
            clock.clone(),
        );
        let aggregator = DailyAggregator::new(
            store.clone(),
            difficulty.clone(),
            sink.clone(),
            WARSAW,
            1024,
        );

        Self {
            store,
            source,
            sink,
            clock,
            difficulty,
            reconciler,
            tracking,
            aggregator,
        }
    }

    /// A polling scheduler over this harness.
    pub fn polling(&self, interval: Duration) -> PollingScheduler {
        PollingScheduler::new(
            self.reconciler.clone(),
            self.store.clone(),
            self.clock.clone(),
            interval,
        )
    }
}
