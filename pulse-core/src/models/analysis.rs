//! `POST /analysis/` request/response shapes and the analysis history feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{AnalysisPayload, MessageBody};
use super::{de_opt_timestamp, de_timestamp};

/// Body for `POST /analysis/`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

/// The backend's discriminated analysis response.
///
/// Small talk comes back as `human_response`; anything the models could
/// analyze comes back as `analysis_response` with the structured payload and,
/// when a history row was stored, its id and timestamp echoed back.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AnalyzeResponse {
    #[serde(rename = "human_response")]
    Human { response: String },

    #[serde(rename = "analysis_response")]
    Analysis {
        #[serde(flatten)]
        payload: AnalysisPayload,
        #[serde(default)]
        id: Option<i64>,
        #[serde(default, deserialize_with = "de_opt_timestamp")]
        created_at: Option<DateTime<Utc>>,
    },
}

impl AnalyzeResponse {
    /// Collapses the response into the display body for the assistant's
    /// message bubble.
    pub fn into_body(self) -> MessageBody {
        match self {
            AnalyzeResponse::Human { response } => MessageBody::Text(response),
            AnalyzeResponse::Analysis { payload, .. } => MessageBody::Analysis(payload),
        }
    }
}

/// One row of `GET /analysis/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub text: String,
    pub sentiment: String,
    pub confidence: f64,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_response_branch() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"type":"human_response","response":"Hi Khutso!"}"#).unwrap();

        match response.into_body() {
            MessageBody::Text(text) => assert_eq!(text, "Hi Khutso!"),
            MessageBody::Analysis(_) => panic!("expected a conversational reply"),
        }
    }

    #[test]
    fn test_analysis_response_branch() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{
                "type": "analysis_response",
                "summary": "Mostly positive feedback about the new UI",
                "sentiment": {"sentiment": "POSITIVE", "confidence": 0.97},
                "topics": ["ui", "feedback"],
                "feedback": "Users like the redesign",
                "risk": false,
                "id": 12,
                "created_at": "2025-02-10T09:00:00"
            }"#,
        )
        .unwrap();

        match response.into_body() {
            MessageBody::Analysis(payload) => {
                assert_eq!(
                    payload.summary.as_deref(),
                    Some("Mostly positive feedback about the new UI")
                );
                assert_eq!(payload.sentiment.as_ref().unwrap().label, "POSITIVE");
                assert_eq!(payload.topics.len(), 2);
                assert_eq!(payload.risk, Some(0));
            }
            MessageBody::Text(_) => panic!("expected a structured analysis"),
        }
    }

    #[test]
    fn test_analyze_request_omits_missing_chat_id() {
        let body = serde_json::to_value(&AnalyzeRequest {
            text: "hello".to_string(),
            chat_id: None,
        })
        .unwrap();
        assert!(body.get("chat_id").is_none());
    }
}
