//! Cross-chat search.
//!
//! Pure matching over already-fetched data; the orchestrator owns debounce
//! and cache fills. Matching is case-insensitive substring over chat titles
//! and message text.

use crate::cache::MessageCache;
use crate::models::{Chat, Message};

/// What part of a chat matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Title,
    Message,
}

/// One search result. At most one hit per chat; a title match wins over a
/// message match, and a message match carries the first matching message.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chat_id: i64,
    pub chat_title: String,
    pub kind: MatchKind,
    /// First matching message, for the snippet line.
    pub message: Option<Message>,
}

/// Runs the query over every chat, consulting the cache for transcripts.
/// Chats missing from the cache are skipped; the orchestrator fills the
/// cache and re-runs. An empty or whitespace query matches nothing.
pub fn search(query: &str, chats: &[Chat], cache: &MessageCache) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for chat in chats {
        if chat.display_title().to_lowercase().contains(&needle) {
            hits.push(SearchHit {
                chat_id: chat.id,
                chat_title: chat.display_title().to_string(),
                kind: MatchKind::Title,
                message: None,
            });
            continue;
        }

        let Some(messages) = cache.get(chat.id) else {
            continue;
        };
        if let Some(message) = messages.iter().find(|m| matches_message(m, &needle)) {
            hits.push(SearchHit {
                chat_id: chat.id,
                chat_title: chat.display_title().to_string(),
                kind: MatchKind::Message,
                message: Some(message.clone()),
            });
        }
    }
    hits
}

fn matches_message(message: &Message, needle: &str) -> bool {
    message
        .body
        .search_text()
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageBody;

    fn chat(id: i64, title: &str) -> Chat {
        Chat {
            id,
            title: title.to_string(),
            is_archived: false,
            created_at: chrono::Utc::now(),
            pinned: false,
        }
    }

    fn message(id: i64, text: &str) -> Message {
        Message {
            id,
            sender: crate::models::Sender::User,
            body: MessageBody::Text(text.to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let chats = vec![chat(1, "Budget review")];
        let cache = MessageCache::new();
        assert!(search("", &chats, &cache).is_empty());
        assert!(search("   ", &chats, &cache).is_empty());
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let chats = vec![chat(1, "Budget Review"), chat(2, "Daily standup")];
        let cache = MessageCache::new();

        let hits = search("budget", &chats, &cache);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chat_id, 1);
        assert_eq!(hits[0].kind, MatchKind::Title);
    }

    #[test]
    fn test_message_match_carries_first_matching_message() {
        let chats = vec![chat(1, "Misc")];
        let mut cache = MessageCache::new();
        cache.insert(
            1,
            vec![
                message(10, "nothing here"),
                message(11, "the quarterly numbers look fine"),
                message(12, "quarterly again"),
            ],
        );

        let hits = search("QUARTERLY", &chats, &cache);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Message);
        assert_eq!(hits[0].message.as_ref().unwrap().id, 11);
    }

    #[test]
    fn test_title_match_wins_over_message_match() {
        let chats = vec![chat(1, "Quarterly planning")];
        let mut cache = MessageCache::new();
        cache.insert(1, vec![message(10, "quarterly numbers")]);

        let hits = search("quarterly", &chats, &cache);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Title);
        assert!(hits[0].message.is_none());
    }

    #[test]
    fn test_uncached_chats_are_skipped() {
        let chats = vec![chat(1, "Misc"), chat(2, "Also misc")];
        let mut cache = MessageCache::new();
        cache.insert(1, vec![message(10, "needle in here")]);

        let hits = search("needle", &chats, &cache);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chat_id, 1);
    }

    #[test]
    fn test_analysis_summary_is_searchable() {
        let chats = vec![chat(1, "Misc")];
        let mut cache = MessageCache::new();
        cache.insert(
            1,
            vec![Message {
                id: 10,
                sender: crate::models::Sender::Ai,
                body: MessageBody::Analysis(crate::models::AnalysisPayload {
                    summary: Some("Churn risk rising".to_string()),
                    ..Default::default()
                }),
                created_at: chrono::Utc::now(),
            }],
        );

        let hits = search("churn", &chats, &cache);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Message);
    }
}
