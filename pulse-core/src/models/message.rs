//! Message wire shapes and normalization.
//!
//! The backend stores message content either as a plain string or as a
//! structured analysis object, and older rows carry structured payloads that
//! were stringified before saving. The shape is resolved exactly once, at the
//! facade boundary, into [`MessageBody`]; nothing downstream re-checks it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::de_timestamp;

/// Who produced a message. The backend accepts `"user"` and `"ai"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Ai,
}

impl Sender {
    /// Anything that is not literally `"user"` renders as the assistant.
    fn from_role(role: &str) -> Self {
        if role == "user" {
            Sender::User
        } else {
            Sender::Ai
        }
    }
}

/// Sentiment classification attached to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "sentiment")]
    pub label: String,
    pub confidence: f64,
}

/// The structured fields of an analysis response or a stored analysis
/// message. Every field is optional; the backend omits whatever a given
/// analysis did not produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "de_risk", skip_serializing_if = "Option::is_none")]
    pub risk: Option<i64>,
}

impl AnalysisPayload {
    pub fn risk_flagged(&self) -> bool {
        self.risk.map(|r| r != 0).unwrap_or(false)
    }
}

/// Message content as it appears on the wire: a structured object or a
/// plain string. Serializes back to exactly the shape it was parsed from,
/// so a structured assistant payload is forwarded as an object, never
/// stringified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Structured(AnalysisPayload),
    Text(String),
}

/// A stored message as returned by `GET /analysis/chats/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub id: i64,
    pub role: String,
    pub content: RawContent,
    #[serde(default, deserialize_with = "de_risk")]
    pub risk: Option<i64>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Uniform display shape. Immutable once created; ordering within a chat is
/// the backend's insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i64,
    pub sender: Sender,
    pub body: MessageBody,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    Analysis(AnalysisPayload),
}

impl MessageBody {
    /// The searchable text of this body: plain text, or the analysis
    /// summary and feedback.
    pub fn search_text(&self) -> Vec<&str> {
        match self {
            MessageBody::Text(text) => vec![text.as_str()],
            MessageBody::Analysis(payload) => payload
                .summary
                .as_deref()
                .into_iter()
                .chain(payload.feedback.as_deref())
                .collect(),
        }
    }

    /// One-line preview for list rendering.
    pub fn preview(&self) -> &str {
        match self {
            MessageBody::Text(text) => text,
            MessageBody::Analysis(payload) => payload
                .summary
                .as_deref()
                .or(payload.feedback.as_deref())
                .unwrap_or("[analysis]"),
        }
    }
}

/// Resolves the dual content shape into a display body.
///
/// Structured objects pass through. Strings that lexically start with `{`
/// or `[` are parsed as structured data, falling back to plain text when the
/// parse fails; nothing is ever surfaced to the user for that fallback.
/// Idempotent: normalizing a body that round-trips through [`RawContent`]
/// yields the same body.
pub fn normalize_content(content: RawContent) -> MessageBody {
    match content {
        RawContent::Structured(payload) => MessageBody::Analysis(payload),
        RawContent::Text(text) => {
            let trimmed = text.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                match serde_json::from_str::<AnalysisPayload>(&text) {
                    Ok(payload) => MessageBody::Analysis(payload),
                    Err(err) => {
                        tracing::debug!("structured-looking content fell back to text: {err}");
                        MessageBody::Text(text)
                    }
                }
            } else {
                MessageBody::Text(text)
            }
        }
    }
}

impl Message {
    pub fn from_raw(raw: RawMessage) -> Self {
        let mut body = normalize_content(raw.content);

        // The stored row-level risk flag wins when the content itself
        // carries none.
        if let (MessageBody::Analysis(payload), Some(risk)) = (&mut body, raw.risk) {
            if payload.risk.is_none() {
                payload.risk = Some(risk);
            }
        }

        Message {
            id: raw.id,
            sender: Sender::from_role(&raw.role),
            body,
            created_at: raw.created_at,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

impl From<MessageBody> for RawContent {
    fn from(body: MessageBody) -> Self {
        match body {
            MessageBody::Text(text) => RawContent::Text(text),
            MessageBody::Analysis(payload) => RawContent::Structured(payload),
        }
    }
}

/// Body for `POST /analysis/chats/{id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub role: Sender,
    pub content: RawContent,
    pub risk: i64,
}

impl NewMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Sender::User,
            content: RawContent::Text(text.into()),
            risk: 0,
        }
    }

    pub fn assistant(body: MessageBody) -> Self {
        let risk = match &body {
            MessageBody::Analysis(payload) => payload.risk.unwrap_or(0),
            MessageBody::Text(_) => 0,
        };
        Self {
            role: Sender::Ai,
            content: body.into(),
            risk,
        }
    }
}

/// Accepts the backend's mixed risk encodings: integers, booleans, or
/// absent.
fn de_risk<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Int(i64),
        Bool(bool),
    }

    let raw = Option::<Flexible>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        Flexible::Int(n) => n,
        Flexible::Bool(b) => i64::from(b),
    }))
}
