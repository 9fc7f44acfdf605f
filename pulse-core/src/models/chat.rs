use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de_timestamp;

/// A chat owned by the current user. Ids are assigned by the backend.
///
/// `pinned` and the archive transition are client-session-only: the backend
/// persists `is_archived` at creation time but this revision never writes
/// either flag back, so both reset on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub pinned: bool,
}

impl Chat {
    /// Display title, falling back for chats that were created with an
    /// empty one.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "New Chat"
        } else {
            &self.title
        }
    }
}

/// Body for `POST /analysis/chats` and `PATCH /analysis/chats/{id}/title`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTitle {
    pub title: String,
}

impl ChatTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_deserializes_wire_shape() {
        let chat: Chat = serde_json::from_str(
            r#"{"id": 3, "title": "Quarterly review", "is_archived": false,
                "created_at": "2025-02-10T09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(chat.id, 3);
        assert_eq!(chat.title, "Quarterly review");
        assert!(!chat.is_archived);
        assert!(!chat.pinned);
    }

    #[test]
    fn test_display_title_fallback() {
        let chat: Chat =
            serde_json::from_str(r#"{"id": 1, "title": "", "created_at": "2025-02-10T09:00:00"}"#)
                .unwrap();
        assert_eq!(chat.display_title(), "New Chat");
    }
}
