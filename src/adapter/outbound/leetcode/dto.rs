//! GraphQL request and response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::SubmissionEvent;
use crate::port::outbound::source::SourceError;

pub const RECENT_AC_QUERY: &str = r"
query recentAcSubmissionList($username: String!, $limit: Int!) {
    recentAcSubmissionList(username: $username, limit: $limit) {
        id
        title
        titleSlug
        timestamp
    }
}";

pub const QUESTION_QUERY: &str = r"
query problemData($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        difficulty
        title
        titleSlug
    }
}";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RecentVariables<'a> {
    pub username: &'a str,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionVariables<'a> {
    pub title_slug: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Split into data or the first reported error.
    pub fn into_data(self) -> Result<Option<T>, SourceError> {
        if let Some(error) = self.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(SourceError::Api(error.message));
        }
        Ok(self.data)
    }
}

/// The source sends ids and timestamps as strings, but numbers are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(i64),
}

impl Scalar {
    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        }
    }

    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAcData {
    pub recent_ac_submission_list: Option<Vec<SubmissionDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    pub id: Scalar,
    pub title: String,
    pub title_slug: String,
    pub timestamp: Scalar,
}

impl TryFrom<SubmissionDto> for SubmissionEvent {
    type Error = SourceError;

    fn try_from(dto: SubmissionDto) -> Result<Self, Self::Error> {
        let timestamp = dto.timestamp.as_i64().ok_or_else(|| {
            SourceError::Decode(format!("bad timestamp for `{}`", dto.title_slug))
        })?;
        Ok(SubmissionEvent::new(
            dto.id.into_string(),
            dto.title,
            dto.title_slug,
            timestamp,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionData {
    pub question: Option<QuestionDto>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionDto {
    pub difficulty: String,
}

/// Decode a `recentAcSubmissionList` response body.
pub fn parse_recent(body: &str) -> Result<Vec<SubmissionEvent>, SourceError> {
    let response: GraphQlResponse<RecentAcData> =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    let data = response
        .into_data()?
        .ok_or_else(|| SourceError::Decode("response has no data".to_string()))?;
    data.recent_ac_submission_list
        .unwrap_or_default()
        .into_iter()
        .map(SubmissionEvent::try_from)
        .collect()
}

/// Decode a `question` response body into the raw difficulty label.
pub fn parse_question(body: &str) -> Result<Option<String>, SourceError> {
    let response: GraphQlResponse<QuestionData> =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    Ok(response
        .into_data()?
        .and_then(|data| data.question)
        .map(|q| q.difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_timestamps_newest_first() {
        let body = r#"{"data":{"recentAcSubmissionList":[
            {"id":"102","title":"Add Two Numbers","titleSlug":"add-two-numbers","timestamp":"1700000100"},
            {"id":"101","title":"Two Sum","titleSlug":"two-sum","timestamp":"1700000000"}
        ]}}"#;

        let events = parse_recent(body).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].slug, "add-two-numbers");
        assert_eq!(events[0].timestamp, 1_700_000_100);
        assert_eq!(events[1].id, "101");
    }

    #[test]
    fn accepts_numeric_fields() {
        let body = r#"{"data":{"recentAcSubmissionList":[
            {"id":7,"title":"Two Sum","titleSlug":"two-sum","timestamp":1700000000}
        ]}}"#;
        let events = parse_recent(body).unwrap();
        assert_eq!(events[0].id, "7");
    }

    #[test]
    fn errors_payload_is_api_error() {
        let body = r#"{"data":{"recentAcSubmissionList":null},"errors":[{"message":"That user does not exist."}]}"#;
        assert_eq!(
            parse_recent(body),
            Err(SourceError::Api("That user does not exist.".into()))
        );
    }

    #[test]
    fn null_list_is_empty() {
        let body = r#"{"data":{"recentAcSubmissionList":null}}"#;
        assert!(parse_recent(body).unwrap().is_empty());
    }

    #[test]
    fn garbage_timestamp_is_decode_error() {
        let body = r#"{"data":{"recentAcSubmissionList":[
            {"id":"1","title":"T","titleSlug":"t","timestamp":"soon"}
        ]}}"#;
        assert!(matches!(parse_recent(body), Err(SourceError::Decode(_))));
    }

    #[test]
    fn non_json_is_decode_error() {
        assert!(matches!(parse_recent("<html>"), Err(SourceError::Decode(_))));
    }

    #[test]
    fn question_difficulty_label() {
        let body = r#"{"data":{"question":{"difficulty":"Medium","title":"X","titleSlug":"x"}}}"#;
        assert_eq!(parse_question(body).unwrap().as_deref(), Some("Medium"));
        assert_eq!(parse_question(r#"{"data":{"question":null}}"#).unwrap(), None);
    }
}
