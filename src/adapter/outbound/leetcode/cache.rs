//! Memoising difficulty resolver.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::Difficulty;
use crate::port::outbound::difficulty::{DifficultyResolver, LookupError};

/// Caches successful lookups. A problem's difficulty never changes, so
/// entries are kept for the life of the process. Failures are not cached.
pub struct CachingResolver {
    inner: Arc<dyn DifficultyResolver>,
    cache: DashMap<String, Difficulty>,
}

impl CachingResolver {
    pub fn new(inner: Arc<dyn DifficultyResolver>) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl DifficultyResolver for CachingResolver {
    async fn resolve(&self, slug: &str) -> Result<Difficulty, LookupError> {
        if let Some(hit) = self.cache.get(slug) {
            return Ok(*hit);
        }
        let difficulty = self.inner.resolve(slug).await?;
        debug!(slug, difficulty = %difficulty, "Cached difficulty");
        self.cache.insert(slug.to_string(), difficulty);
        Ok(difficulty)
    }
}
