//! Problem difficulty lookup port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Difficulty;

use super::source::SourceError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("problem `{0}` not found")]
    NotFound(String),

    #[error("problem `{slug}` has unknown difficulty `{label}`")]
    UnknownDifficulty { slug: String, label: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Resolves a problem slug to its difficulty class.
#[async_trait]
pub trait DifficultyResolver: Send + Sync {
    async fn resolve(&self, slug: &str) -> Result<Difficulty, LookupError>;
}
