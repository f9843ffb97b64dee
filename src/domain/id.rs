//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

const MAX_USERNAME_LEN: usize = 64;

/// Username on the submission source - the key of a tracked entity.
///
/// The inner String is private so every value has passed [`Username::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    ///
    /// Surrounding whitespace is trimmed. The remaining text must be
    /// non-empty, at most 64 characters, and contain only ASCII letters,
    /// digits, `-` and `_`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUsername`] when validation fails.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidUsername {
                value: raw.to_string(),
                reason: "must not be empty",
            });
        }
        if value.len() > MAX_USERNAME_LEN {
            return Err(DomainError::InvalidUsername {
                value: raw.to_string(),
                reason: "must be at most 64 characters",
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidUsername {
                value: raw.to_string(),
                reason: "may only contain letters, digits, '-' and '_'",
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Get the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Opaque destination channel identifier (e.g. a Telegram chat id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Wrap a channel identifier, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyChannelId`] for empty or whitespace input.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::EmptyChannelId);
        }
        Ok(Self(value.to_string()))
    }

    /// Get the channel ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChannelId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a group of channels (a server, a group chat).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(String);

impl ScopeId {
    /// Create a new `ScopeId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the scope ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
