//! Domain validation errors for core domain types.
//!
//! These errors are returned by `parse` constructors when user-supplied
//! identifiers violate domain rules.
//!
//! # Examples
//!
//! ```
//! use solvewatch::domain::error::DomainError;
//! use solvewatch::domain::id::Username;
//!
//! let result = Username::parse("not a username");
//! assert!(matches!(result, Err(DomainError::InvalidUsername { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Usernames must be non-empty and limited to the source's charset.
    #[error("invalid username `{value}`: {reason}")]
    InvalidUsername {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Channel identifiers cannot be blank.
    #[error("channel id cannot be empty")]
    EmptyChannelId,

    /// Difficulty labels must be one of the three known classes.
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
}
