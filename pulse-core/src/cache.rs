//! Per-chat message cache.
//!
//! Backs the cross-chat search so a stream of keystrokes does not turn into
//! a stream of refetches. Invalidation is per chat: sending, deleting, or
//! any other mutation touches exactly the chats it changed.

use std::collections::HashMap;

use crate::models::Message;

#[derive(Debug, Default)]
pub struct MessageCache {
    entries: HashMap<i64, Vec<Message>>,
}

impl MessageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: i64) -> Option<&[Message]> {
        self.entries.get(&chat_id).map(Vec::as_slice)
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.entries.contains_key(&chat_id)
    }

    pub fn insert(&mut self, chat_id: i64, messages: Vec<Message>) {
        self.entries.insert(chat_id, messages);
    }

    /// Appends to a cached chat; a miss stays a miss so the next search
    /// fetches the full transcript.
    pub fn append(&mut self, chat_id: i64, message: Message) {
        if let Some(messages) = self.entries.get_mut(&chat_id) {
            messages.push(message);
        }
    }

    pub fn invalidate(&mut self, chat_id: i64) {
        self.entries.remove(&chat_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageBody;

    fn message(id: i64, text: &str) -> Message {
        Message {
            id,
            sender: crate::models::Sender::User,
            body: MessageBody::Text(text.to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = MessageCache::new();
        assert!(cache.get(1).is_none());

        cache.insert(1, vec![message(10, "hello")]);
        assert_eq!(cache.get(1).unwrap().len(), 1);
        assert!(cache.contains(1));
    }

    #[test]
    fn test_append_only_touches_cached_chats() {
        let mut cache = MessageCache::new();
        cache.insert(1, vec![message(10, "a")]);

        cache.append(1, message(11, "b"));
        cache.append(2, message(12, "c"));

        assert_eq!(cache.get(1).unwrap().len(), 2);
        assert!(!cache.contains(2));
    }

    #[test]
    fn test_invalidate_is_per_chat() {
        let mut cache = MessageCache::new();
        cache.insert(1, vec![message(10, "a")]);
        cache.insert(2, vec![message(11, "b")]);

        cache.invalidate(1);
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
    }
}
