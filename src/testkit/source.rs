//! A submission source with scripted responses.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{SubmissionEvent, Username};
use crate::port::outbound::source::{SourceError, SubmissionSource};

/// Returns the recent list set for each user (newest first, as the real
/// source does). One-shot failures queued with [`ScriptedSource::fail_next`]
/// are returned before the list. Unknown users get an empty list.
#[derive(Default)]
pub struct ScriptedSource {
    recent: Mutex<HashMap<String, Vec<SubmissionEvent>>>,
    failures: Mutex<HashMap<String, VecDeque<SourceError>>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every fetch.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the recent list for `username`. Events are given oldest
    /// first and returned newest first.
    pub fn set_recent(&self, username: &Username, mut events: Vec<SubmissionEvent>) {
        events.reverse();
        self.recent
            .lock()
            .insert(username.as_str().to_string(), events);
    }

    /// Fail the next fetch for `username` with `error`.
    pub fn fail_next(&self, username: &Username, error: SourceError) {
        self.failures
            .lock()
            .entry(username.as_str().to_string())
            .or_default()
            .push_back(error);
    }

    /// How many fetches were made for `username`.
    pub fn calls(&self, username: &Username) -> usize {
        self.calls
            .lock()
            .get(username.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SubmissionSource for ScriptedSource {
    async fn fetch_recent(&self, username: &Username) -> Result<Vec<SubmissionEvent>, SourceError> {
        *self
            .calls
            .lock()
            .entry(username.as_str().to_string())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self
            .failures
            .lock()
            .get_mut(username.as_str())
            .and_then(VecDeque::pop_front);
        if let Some(err) = failure {
            return Err(err);
        }

        Ok(self
            .recent
            .lock()
            .get(username.as_str())
            .cloned()
            .unwrap_or_default())
    }
}
