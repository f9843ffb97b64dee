//! LeetCode GraphQL client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, ORIGIN, REFERER};
use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::debug;

use super::dto::{
    parse_question, parse_recent, GraphQlRequest, QuestionVariables, RecentVariables,
    QUESTION_QUERY, RECENT_AC_QUERY,
};
use super::settings::{LeetCodeConfig, LeetCodeCredentials};
use crate::domain::{Difficulty, SubmissionEvent, Username};
use crate::error::{Error, Result};
use crate::port::outbound::difficulty::{DifficultyResolver, LookupError};
use crate::port::outbound::source::{SourceError, SubmissionSource};

const SITE: &str = "https://leetcode.com";

/// HTTP client for the LeetCode GraphQL API.
pub struct LeetCodeClient {
    http: HttpClient,
    api_url: String,
    recent_limit: u32,
    timeout: Duration,
}

impl LeetCodeClient {
    /// Build a client from config, attaching session cookies when present.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or a credential
    /// contains characters not allowed in a header.
    pub fn from_config(
        config: &LeetCodeConfig,
        credentials: Option<&LeetCodeCredentials>,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = HttpClient::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers(credentials)?)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            recent_limit: config.recent_limit,
            timeout,
        })
    }

    async fn post<V: Serialize + Sync>(
        &self,
        request: &GraphQlRequest<'_, V>,
    ) -> std::result::Result<String, SourceError> {
        let response = self
            .http
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        if !status.is_success() {
            debug!(status = %status, body = %body, "LeetCode request failed");
            return Err(SourceError::Fetch(format!("unexpected status {status}")));
        }
        Ok(body)
    }

    fn transport_error(&self, err: &reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else {
            SourceError::Fetch(err.to_string())
        }
    }
}

fn default_headers(credentials: Option<&LeetCodeCredentials>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(REFERER, HeaderValue::from_static("https://leetcode.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE));

    if let Some(creds) = credentials {
        let cookie = format!(
            "csrftoken={}; LEETCODE_SESSION={}",
            creds.csrf_token, creds.session
        );
        let mut cookie = HeaderValue::from_str(&cookie)
            .map_err(|e| Error::Parse(format!("invalid LeetCode session: {e}")))?;
        cookie.set_sensitive(true);
        let mut csrf = HeaderValue::from_str(&creds.csrf_token)
            .map_err(|e| Error::Parse(format!("invalid LeetCode csrf token: {e}")))?;
        csrf.set_sensitive(true);
        headers.insert(COOKIE, cookie);
        headers.insert("x-csrftoken", csrf);
    }
    Ok(headers)
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn fetch_recent(
        &self,
        username: &Username,
    ) -> std::result::Result<Vec<SubmissionEvent>, SourceError> {
        let request = GraphQlRequest {
            query: RECENT_AC_QUERY,
            variables: RecentVariables {
                username: username.as_str(),
                limit: self.recent_limit,
            },
            operation_name: "recentAcSubmissionList",
        };
        let body = self.post(&request).await?;
        let events = parse_recent(&body)?;
        debug!(username = %username, count = events.len(), "Fetched recent submissions");
        Ok(events)
    }
}

#[async_trait]
impl DifficultyResolver for LeetCodeClient {
    async fn resolve(&self, slug: &str) -> std::result::Result<Difficulty, LookupError> {
        let request = GraphQlRequest {
            query: QUESTION_QUERY,
            variables: QuestionVariables { title_slug: slug },
            operation_name: "problemData",
        };
        let body = self.post(&request).await?;
        let label = parse_question(&body)?.ok_or_else(|| LookupError::NotFound(slug.to_string()))?;
        label
            .parse::<Difficulty>()
            .map_err(|_| LookupError::UnknownDifficulty {
                slug: slug.to_string(),
                label,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_include_cookie_when_credentials_given() {
        let creds = LeetCodeCredentials {
            session: "abc".into(),
            csrf_token: "xyz".into(),
        };
        let headers = default_headers(Some(&creds)).unwrap();
        assert_eq!(
            headers.get(COOKIE).unwrap().to_str().unwrap(),
            "csrftoken=xyz; LEETCODE_SESSION=abc"
        );
        assert_eq!(headers.get("x-csrftoken").unwrap().to_str().unwrap(), "xyz");
    }

    #[test]
    fn anonymous_headers_have_no_cookie() {
        let headers = default_headers(None).unwrap();
        assert!(headers.get(COOKIE).is_none());
        assert_eq!(headers.get(ORIGIN).unwrap().to_str().unwrap(), SITE);
    }

    #[test]
    fn newline_in_session_is_rejected() {
        let creds = LeetCodeCredentials {
            session: "abc\n".into(),
            csrf_token: "xyz".into(),
        };
        assert!(default_headers(Some(&creds)).is_err());
    }

    #[test]
    fn builds_from_default_config() {
        assert!(LeetCodeClient::from_config(&LeetCodeConfig::default(), None).is_ok());
    }
}
