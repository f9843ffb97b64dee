//! LeetCode source configuration.

use serde::Deserialize;

/// `[source]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct LeetCodeConfig {
    /// GraphQL endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// How many recent accepted submissions to request per fetch.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://leetcode.com/graphql".to_string()
}

const fn default_recent_limit() -> u32 {
    20
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string()
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            recent_limit: default_recent_limit(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Session cookie pair for authenticated requests.
///
/// Never read from the config file; only from the environment.
#[derive(Clone)]
pub struct LeetCodeCredentials {
    pub session: String,
    pub csrf_token: String,
}

impl std::fmt::Debug for LeetCodeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeetCodeCredentials")
            .field("session", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .finish()
    }
}

impl LeetCodeCredentials {
    /// Read `LEETCODE_SESSION` and `LEETCODE_CSRF_TOKEN`. Returns `None`
    /// unless both are set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let session = std::env::var("LEETCODE_SESSION").ok()?;
        let csrf_token = std::env::var("LEETCODE_CSRF_TOKEN").ok()?;
        if session.trim().is_empty() || csrf_token.trim().is_empty() {
            return None;
        }
        Some(Self {
            session,
            csrf_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoint() {
        let config = LeetCodeConfig::default();
        assert_eq!(config.api_url, "https://leetcode.com/graphql");
        assert_eq!(config.recent_limit, 20);
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = LeetCodeCredentials {
            session: "secret-session".into(),
            csrf_token: "secret-token".into(),
        };
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret"));
    }
}
