//! Per-view state containers.

use std::time::Instant;

use pulse_core::SearchHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// A single-line text input with a cursor at the end.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub value: String,
    /// Render as dots instead of the raw value
    pub masked: bool,
}

impl InputField {
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub email: InputField,
    pub password: InputField,
    /// 0 = email, 1 = password
    pub focus: usize,
    pub busy: bool,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            password: InputField::masked(),
            ..Default::default()
        }
    }

    pub fn focused_field(&mut self) -> &mut InputField {
        if self.focus == 0 {
            &mut self.email
        } else {
            &mut self.password
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % 2;
    }

    pub fn is_submittable(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && !self.busy
    }
}

#[derive(Debug, Default)]
pub struct SignupState {
    pub username: InputField,
    pub email: InputField,
    pub password: InputField,
    /// 0 = username, 1 = email, 2 = password
    pub focus: usize,
    pub busy: bool,
    pub error: Option<String>,
}

impl SignupState {
    pub fn new() -> Self {
        Self {
            password: InputField::masked(),
            ..Default::default()
        }
    }

    pub fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            0 => &mut self.username,
            1 => &mut self.email,
            _ => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % 3;
    }

    pub fn is_submittable(&self) -> bool {
        !self.username.is_empty() && !self.email.is_empty() && !self.password.is_empty()
            && !self.busy
    }
}

/// Message composer at the bottom of the chat view.
#[derive(Debug, Default)]
pub struct ComposerState {
    pub input: InputField,
    /// Send in flight; composer is locked until the reply lands or fails
    pub busy: bool,
}

impl ComposerState {
    pub fn can_send(&self) -> bool {
        !self.input.is_empty() && !self.busy
    }

    pub fn take_text(&mut self) -> String {
        let text = self.input.value.trim().to_string();
        self.input.clear();
        text
    }
}

/// Cross-chat search overlay.
#[derive(Debug, Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    /// Set on every keystroke; the debounce timer measures from here
    pub last_keystroke: Option<Instant>,
    /// Query text the current `results` were computed for
    pub executed_query: Option<String>,
    pub results: Vec<SearchHit>,
    pub selected: usize,
    /// Chats whose transcripts are being fetched to complete this search
    pub pending_fetches: usize,
}

impl SearchState {
    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn type_char(&mut self, c: char) {
        self.query.push(c);
        self.last_keystroke = Some(Instant::now());
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.last_keystroke = Some(Instant::now());
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + self.results.len() - 1) % self.results.len();
        }
    }

    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.results.get(self.selected)
    }

    /// True when the query changed and the quiet period has elapsed.
    pub fn debounce_elapsed(&self, debounce: std::time::Duration) -> bool {
        match self.last_keystroke {
            Some(at) => {
                at.elapsed() >= debounce
                    && self.executed_query.as_deref() != Some(self.query.as_str())
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_masked_input_displays_dots() {
        let mut field = InputField::masked();
        field.push('a');
        field.push('b');
        assert_eq!(field.display(), "••");
        field.backspace();
        assert_eq!(field.display(), "•");
    }

    #[test]
    fn test_login_submittable_requires_both_fields() {
        let mut login = LoginState::new();
        assert!(!login.is_submittable());
        login.email.value = "a@b.c".to_string();
        assert!(!login.is_submittable());
        login.password.value = "pw".to_string();
        assert!(login.is_submittable());
        login.busy = true;
        assert!(!login.is_submittable());
    }

    #[test]
    fn test_composer_take_text_trims_and_clears() {
        let mut composer = ComposerState::default();
        composer.input.value = "  hello  ".to_string();
        assert_eq!(composer.take_text(), "hello");
        assert!(composer.input.is_empty());
    }

    #[test]
    fn test_search_debounce() {
        let mut search = SearchState::default();
        assert!(!search.debounce_elapsed(Duration::ZERO));

        search.type_char('a');
        assert!(search.debounce_elapsed(Duration::ZERO));
        // A long debounce has not elapsed yet
        assert!(!search.debounce_elapsed(Duration::from_secs(60)));

        search.executed_query = Some("a".to_string());
        assert!(!search.debounce_elapsed(Duration::ZERO));
    }

    #[test]
    fn test_search_selection_wraps() {
        let mut search = SearchState::default();
        search.select_next();
        assert_eq!(search.selected, 0);
    }
}
