//! Chat title derivation.
//!
//! A chat's placeholder title is rewritten exactly once, from the first user
//! message. The derivation is a pure function of the input text: no I/O, no
//! randomness.

/// Title used for chats before their first message, and for input that
/// strips down to nothing.
pub const DEFAULT_TITLE: &str = "New Chat";

const MAX_WORDS: usize = 5;
const MAX_LEN: usize = 50;
const ELLIPSIS: &str = "...";

/// Derives a short human-readable title from a message.
///
/// Strips everything that is not a word character or whitespace, collapses
/// whitespace runs, keeps the first five words, capitalizes the first
/// character, marks truncation with an ellipsis, and clamps the result to 50
/// characters. Never returns an empty string.
pub fn generate_title(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    let mut title = words[..words.len().min(MAX_WORDS)].join(" ");

    let mut chars = title.chars();
    if let Some(first) = chars.next() {
        title = first.to_uppercase().chain(chars).collect();
    }

    if words.len() > MAX_WORDS {
        title.push_str(ELLIPSIS);
    }

    if title.chars().count() > MAX_LEN {
        title = title.chars().take(MAX_LEN - ELLIPSIS.len()).collect();
        title.push_str(ELLIPSIS);
    }

    title
}
