//! A fixed difficulty table.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Difficulty;
use crate::port::outbound::difficulty::{DifficultyResolver, LookupError};

/// Resolves slugs from a table; anything else is `NotFound`.
#[derive(Default)]
pub struct StaticDifficulty {
    table: HashMap<String, Difficulty>,
    lookups: Mutex<usize>,
}

impl StaticDifficulty {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, slug: &str, difficulty: Difficulty) -> Self {
        self.table.insert(slug.to_string(), difficulty);
        self
    }

    /// Total lookups served, hits and misses alike.
    pub fn lookups(&self) -> usize {
        *self.lookups.lock()
    }
}

#[async_trait]
impl DifficultyResolver for StaticDifficulty {
    async fn resolve(&self, slug: &str) -> Result<Difficulty, LookupError> {
        *self.lookups.lock() += 1;
        self.table
            .get(slug)
            .copied()
            .ok_or_else(|| LookupError::NotFound(slug.to_string()))
    }
}
