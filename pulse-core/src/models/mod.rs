//! Wire and display types for the PulseAI backend.

pub mod analysis;
pub mod chat;
pub mod dashboard;
pub mod message;
pub mod user;

pub use analysis::{AnalyzeRequest, AnalyzeResponse, HistoryEntry};
pub use chat::{Chat, ChatTitle};
pub use dashboard::{DashboardStats, RiskDistribution, TopicFrequency, TrendPoint};
pub use message::{
    AnalysisPayload, Message, MessageBody, NewMessage, RawContent, RawMessage, Sender, Sentiment,
};
pub use user::{Credentials, SignupRequest, TokenResponse, UserProfile};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parses the backend's timestamps. FastAPI emits `isoformat()` of naive
/// datetimes (no offset), but offset-bearing RFC 3339 must also work.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{raw}'")))
}

pub(crate) fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{s}'"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_naive() {
        let dt = parse_timestamp("2025-03-01T10:15:30.123456").unwrap();
        assert_eq!(dt.timestamp(), 1740824130);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2025-03-01T10:15:30+02:00").unwrap();
        assert_eq!(dt.timestamp(), 1740816930);
    }

    #[test]
    fn test_parse_timestamp_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
