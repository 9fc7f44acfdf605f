use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use pulse_core::{
    generate_title, search, ApiClient, Chat, ChatApi, Credentials, DashboardApi, Message,
    MessageBody, MessageCache, PulseConfig, Sender, SessionStore, SignupRequest, DEFAULT_TITLE,
};

use crate::data::{
    spawn_create_chat, spawn_delete_chat, spawn_fetch_dashboard, spawn_fetch_messages,
    spawn_fetch_search_messages, spawn_load_chats, spawn_send_pipeline, AppEvent, ComposerState,
    DashboardData, EventSender, LoadingState, LoginState, SearchState, SignupState,
};
use crate::theme::{ThemeLoader, ThemeManager};
use crate::ui;
use crate::ui::widgets::{ConfirmDialog, DialogResult, DialogState, ToastManager};

/// Placeholder id for a user message shown before the backend has stored
/// it; real ids are positive.
const PENDING_MESSAGE_ID: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    Chat,
    Dashboard,
    Help,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Signup => "Create Account",
            View::Chat => "Chat",
            View::Dashboard => "Dashboard",
            View::Help => "Help",
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub view: View,
    previous_view: View,

    pub config: PulseConfig,
    pub session: SessionStore,
    pub chat_api: ChatApi,
    pub dashboard_api: DashboardApi,

    pub theme_manager: ThemeManager,
    pub theme_loader: ThemeLoader,
    pub toasts: ToastManager,
    pub dialog: DialogState,

    pub login: LoginState,
    pub signup: SignupState,

    pub chats: Vec<Chat>,
    pub chats_loading: LoadingState,
    pub selected: usize,
    pub active_chat: Option<i64>,

    pub messages: Vec<Message>,
    pub messages_loading: LoadingState,
    pub composer: ComposerState,
    /// Chat waiting on an assistant reply; drives the typing indicator
    pub typing_chat: Option<i64>,

    pub search: SearchState,
    pub cache: MessageCache,
    /// Message to highlight once its chat's transcript loads
    pending_highlight: Option<i64>,
    pub highlight: Option<(i64, Instant)>,

    pub dashboard: DashboardData,
    pub dashboard_loading: LoadingState,

    pending_delete: Option<i64>,
    pub animation_tick: u64,

    tx: EventSender,
    rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: PulseConfig, token_path: PathBuf) -> Result<Self> {
        let client = ApiClient::new(config.base_url(), config.request_timeout())?;
        let session = SessionStore::new(client.clone(), token_path);
        let chat_api = ChatApi::new(client.clone());
        let dashboard_api = DashboardApi::new(client);

        let theme_loader = ThemeLoader::new();
        let mut theme_manager = theme_loader.initialize_theme_manager();
        theme_manager.set_theme_by_name(&config.tui.theme);

        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            should_quit: false,
            view: View::Login,
            previous_view: View::Login,
            config,
            session,
            chat_api,
            dashboard_api,
            theme_manager,
            theme_loader,
            toasts: ToastManager::new(),
            dialog: DialogState::new(),
            login: LoginState::new(),
            signup: SignupState::new(),
            chats: Vec::new(),
            chats_loading: LoadingState::Idle,
            selected: 0,
            active_chat: None,
            messages: Vec::new(),
            messages_loading: LoadingState::Idle,
            composer: ComposerState::default(),
            typing_chat: None,
            search: SearchState::default(),
            cache: MessageCache::new(),
            pending_highlight: None,
            highlight: None,
            dashboard: DashboardData::default(),
            dashboard_loading: LoadingState::Idle,
            pending_delete: None,
            animation_tick: 0,
            tx,
            rx,
        })
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tui.tick_rate_ms);

        match self.session.restore().await {
            Ok(Some(user)) => {
                self.toasts.success(format!("Welcome back, {}", user.username));
                self.enter_chat();
            }
            Ok(None) => {}
            Err(e) => self.toasts.error(format!("Could not reach the server: {e}")),
        }

        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            while let Ok(app_event) = self.rx.try_recv() {
                self.apply_event(app_event);
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }

            self.tick();

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advances time-driven state: toast expiry, highlight expiry, search
    /// debounce, the spinner.
    pub fn tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.toasts.tick();

        if let Some((_, since)) = self.highlight {
            if since.elapsed() >= Duration::from_millis(self.config.tui.highlight_ms) {
                self.highlight = None;
            }
        }

        if self.search.active
            && self
                .search
                .debounce_elapsed(Duration::from_millis(self.config.tui.search_debounce_ms))
        {
            self.run_search();
        }
    }

    pub fn current_theme(&self) -> &dyn crate::theme::Theme {
        self.theme_manager.current_theme()
    }

    // ---- chat list ordering ------------------------------------------------

    /// Sidebar order: pinned chats first, then the rest, archived at the
    /// bottom.
    pub fn visible_chats(&self) -> Vec<&Chat> {
        let mut ordered: Vec<&Chat> = Vec::with_capacity(self.chats.len());
        ordered.extend(self.chats.iter().filter(|c| c.pinned && !c.is_archived));
        ordered.extend(self.chats.iter().filter(|c| !c.pinned && !c.is_archived));
        ordered.extend(self.chats.iter().filter(|c| c.is_archived));
        ordered
    }

    fn visible_order(&self) -> Vec<i64> {
        self.visible_chats().iter().map(|c| c.id).collect()
    }

    fn selected_chat_id(&self) -> Option<i64> {
        self.visible_order().get(self.selected).copied()
    }

    fn select_chat(&mut self, chat_id: i64) {
        if let Some(index) = self.visible_order().iter().position(|id| *id == chat_id) {
            self.selected = index;
        }
        self.active_chat = Some(chat_id);
        self.messages.clear();
        self.messages_loading = LoadingState::Loading;
        spawn_fetch_messages(self.chat_api.clone(), self.tx.clone(), chat_id);
    }

    fn move_selection(&mut self, delta: i64) {
        let order = self.visible_order();
        if order.is_empty() {
            return;
        }
        let len = order.len() as i64;
        let next = ((self.selected as i64 + delta) % len + len) % len;
        self.select_chat(order[next as usize]);
    }

    // ---- event reducer -----------------------------------------------------

    /// Applies one background-task event to the UI state. Results carry the
    /// chat id they were fetched for; anything that no longer matches the
    /// active chat updates the cache only.
    pub fn apply_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::ChatsLoaded(Ok(mut chats)) => {
                // Carry session-local pin/archive flags across refreshes
                for chat in &mut chats {
                    if let Some(old) = self.chats.iter().find(|c| c.id == chat.id) {
                        chat.pinned = old.pinned;
                        chat.is_archived = chat.is_archived || old.is_archived;
                    }
                }
                self.chats = chats;
                self.chats_loading = LoadingState::Success;

                if self.active_chat.is_none() {
                    if let Some(first) = self.visible_order().first().copied() {
                        self.select_chat(first);
                    }
                } else if let Some(id) = self.active_chat {
                    if let Some(index) = self.visible_order().iter().position(|c| *c == id) {
                        self.selected = index;
                    }
                }
            }
            AppEvent::ChatsLoaded(Err(e)) => {
                self.chats_loading = LoadingState::Error;
                self.toasts.error(format!("Failed to load chats: {e}"));
            }

            AppEvent::ChatCreated(Ok(chat)) => {
                let chat_id = chat.id;
                self.chats.insert(0, chat);
                self.search.close();
                self.select_chat(chat_id);
            }
            AppEvent::ChatCreated(Err(e)) => {
                self.toasts.error(format!("Failed to create chat: {e}"));
            }

            AppEvent::MessagesLoaded { chat_id, result } => match result {
                Ok(messages) => {
                    self.cache.insert(chat_id, messages.clone());
                    if self.active_chat == Some(chat_id) {
                        self.messages = messages;
                        self.messages_loading = LoadingState::Success;
                        if let Some(target) = self.pending_highlight.take() {
                            if self.messages.iter().any(|m| m.id == target) {
                                self.highlight = Some((target, Instant::now()));
                            }
                        }
                    }
                }
                Err(e) => {
                    if self.active_chat == Some(chat_id) {
                        self.messages_loading = LoadingState::Error;
                        self.toasts.error(format!("Failed to load messages: {e}"));
                    }
                }
            },

            AppEvent::UserMessageStored { chat_id, message } => {
                self.cache.append(chat_id, message.clone());
                if self.active_chat == Some(chat_id) {
                    if let Some(pending) = self
                        .messages
                        .iter_mut()
                        .find(|m| m.id == PENDING_MESSAGE_ID)
                    {
                        *pending = message;
                    } else {
                        self.messages.push(message);
                    }
                }
            }

            AppEvent::AssistantReply { chat_id, result } => {
                if self.typing_chat == Some(chat_id) {
                    self.typing_chat = None;
                    self.composer.busy = false;
                }
                match result {
                    Ok(message) => {
                        self.cache.append(chat_id, message.clone());
                        if self.active_chat == Some(chat_id) {
                            self.messages.push(message);
                        }
                    }
                    Err(e) => {
                        self.cache.invalidate(chat_id);
                        self.toasts.error(format!("Failed to store reply: {e}"));
                    }
                }
            }

            AppEvent::ChatRenamed { chat_id, result } => match result {
                Ok(renamed) => {
                    if let Some(chat) = self.chats.iter_mut().find(|c| c.id == chat_id) {
                        chat.title = renamed.title;
                    }
                }
                Err(e) => self.toasts.error(format!("Failed to rename chat: {e}")),
            },

            AppEvent::ChatDeleted { chat_id, result } => match result {
                Ok(()) => {
                    self.cache.invalidate(chat_id);
                    let was_active = self.active_chat == Some(chat_id);
                    self.chats.retain(|c| c.id != chat_id);
                    self.toasts.success("Chat deleted");

                    if was_active {
                        self.active_chat = None;
                        self.messages.clear();
                        self.messages_loading = LoadingState::Idle;
                        if self.typing_chat == Some(chat_id) {
                            self.typing_chat = None;
                            self.composer.busy = false;
                        }

                        let order = self.visible_order();
                        if order.is_empty() {
                            self.selected = 0;
                        } else {
                            let index = self.selected.min(order.len() - 1);
                            self.select_chat(order[index]);
                        }
                    } else if let Some(id) = self.active_chat {
                        if let Some(index) = self.visible_order().iter().position(|c| *c == id) {
                            self.selected = index;
                        }
                    }
                }
                Err(e) => self.toasts.error(format!("Failed to delete chat: {e}")),
            },

            AppEvent::SearchMessagesLoaded { chat_id, result } => {
                self.search.pending_fetches = self.search.pending_fetches.saturating_sub(1);
                if let Ok(messages) = result {
                    self.cache.insert(chat_id, messages);
                }
                if self.search.active {
                    self.search.results =
                        search(&self.search.query, &self.chats, &self.cache);
                    if self.search.selected >= self.search.results.len() {
                        self.search.selected = 0;
                    }
                }
            }

            AppEvent::DashboardLoaded(Ok(data)) => {
                self.dashboard = data;
                self.dashboard_loading = LoadingState::Success;
            }
            AppEvent::DashboardLoaded(Err(e)) => {
                self.dashboard_loading = LoadingState::Error;
                self.toasts.error(format!("Failed to load dashboard: {e}"));
            }

            AppEvent::SendFailed { chat_id, error } => {
                if self.typing_chat == Some(chat_id) {
                    self.typing_chat = None;
                }
                self.composer.busy = false;
                // A message the backend never stored goes back into the
                // composer instead of vanishing
                if let Some(pos) = self
                    .messages
                    .iter()
                    .position(|m| m.id == PENDING_MESSAGE_ID)
                {
                    if let MessageBody::Text(text) = &self.messages[pos].body {
                        self.composer.input.value = text.clone();
                    }
                    self.messages.remove(pos);
                }
                self.toasts.error(format!("Message failed: {error}"));
            }
        }
    }

    // ---- search ------------------------------------------------------------

    fn run_search(&mut self) {
        self.search.executed_query = Some(self.search.query.clone());
        let query = self.search.query.trim().to_string();
        if query.is_empty() {
            self.search.results.clear();
            self.search.selected = 0;
            return;
        }

        // Transcripts missing from the cache are fetched in the background;
        // results refine as they land.
        let missing: Vec<i64> = self
            .chats
            .iter()
            .filter(|c| !self.cache.contains(c.id))
            .map(|c| c.id)
            .collect();
        for chat_id in missing {
            self.search.pending_fetches += 1;
            spawn_fetch_search_messages(self.chat_api.clone(), self.tx.clone(), chat_id);
        }

        self.search.results = search(&query, &self.chats, &self.cache);
        self.search.selected = 0;
    }

    fn open_search_result(&mut self) {
        let Some(hit) = self.search.selected_hit().cloned() else {
            return;
        };
        self.search.close();
        self.pending_highlight = hit.message.as_ref().map(|m| m.id);
        self.select_chat(hit.chat_id);
    }

    // ---- commands ----------------------------------------------------------

    fn enter_chat(&mut self) {
        self.view = View::Chat;
        self.chats_loading = LoadingState::Loading;
        spawn_load_chats(self.chat_api.clone(), self.tx.clone());
    }

    fn enter_dashboard(&mut self) {
        self.view = View::Dashboard;
        self.dashboard_loading = LoadingState::Loading;
        spawn_fetch_dashboard(self.dashboard_api.clone(), self.tx.clone());
    }

    fn logout(&mut self) {
        self.session.logout();
        self.chats.clear();
        self.messages.clear();
        self.cache.clear();
        self.search.close();
        self.active_chat = None;
        self.typing_chat = None;
        self.selected = 0;
        self.composer = ComposerState::default();
        self.login = LoginState::new();
        self.signup = SignupState::new();
        self.view = View::Login;
    }

    async fn submit_login(&mut self) {
        if !self.login.is_submittable() {
            return;
        }
        self.login.busy = true;
        self.login.error = None;

        let credentials = Credentials {
            email: self.login.email.value.trim().to_string(),
            password: self.login.password.value.clone(),
        };
        match self.session.login(&credentials).await {
            Ok(user) => {
                self.toasts.success(format!("Signed in as {}", user.username));
                self.enter_chat();
            }
            Err(e) => self.login.error = Some(e.to_string()),
        }
        self.login.busy = false;
    }

    async fn submit_signup(&mut self) {
        if !self.signup.is_submittable() {
            return;
        }
        self.signup.busy = true;
        self.signup.error = None;

        let request = SignupRequest {
            username: self.signup.username.value.trim().to_string(),
            email: self.signup.email.value.trim().to_string(),
            password: self.signup.password.value.clone(),
        };
        match self.session.signup(&request).await {
            Ok(user) => {
                self.toasts.success(format!("Welcome, {}", user.username));
                self.enter_chat();
            }
            Err(e) => self.signup.error = Some(e.to_string()),
        }
        self.signup.busy = false;
    }

    fn new_chat(&mut self) {
        spawn_create_chat(
            self.chat_api.clone(),
            self.tx.clone(),
            DEFAULT_TITLE.to_string(),
        );
    }

    fn send_current_message(&mut self) {
        if !self.composer.can_send() {
            return;
        }
        let Some(chat_id) = self.active_chat else {
            self.toasts.warning("Select or create a chat first");
            return;
        };

        let text = self.composer.take_text();
        self.composer.busy = true;
        self.typing_chat = Some(chat_id);

        // Shown right away; swapped for the stored row when it comes back
        self.messages.push(Message {
            id: PENDING_MESSAGE_ID,
            sender: Sender::User,
            body: MessageBody::Text(text.clone()),
            created_at: Utc::now(),
        });

        // A chat still on its placeholder title takes its real one from the
        // first user message.
        let is_first_user_message = !self.messages.iter().any(|m| m.is_user());
        let has_placeholder_title = self
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .map(|c| c.title.is_empty() || c.title == DEFAULT_TITLE)
            .unwrap_or(false);
        let new_title = (is_first_user_message && has_placeholder_title)
            .then(|| generate_title(&text));

        spawn_send_pipeline(
            self.chat_api.clone(),
            self.tx.clone(),
            chat_id,
            text,
            new_title,
        );
    }

    fn request_delete(&mut self) {
        let Some(chat_id) = self.selected_chat_id() else {
            return;
        };
        let title = self
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .map(|c| c.display_title().to_string())
            .unwrap_or_default();

        self.pending_delete = Some(chat_id);
        self.dialog.show(
            ConfirmDialog::danger("Delete chat", format!("Delete \"{title}\" and all its messages?"))
                .with_confirm_label("Delete"),
        );
    }

    fn toggle_pin(&mut self) {
        let Some(chat_id) = self.selected_chat_id() else {
            return;
        };
        if let Some(chat) = self.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.pinned = !chat.pinned;
        }
        // Keep the selection on the chat it was on, wherever it moved
        if let Some(index) = self.visible_order().iter().position(|c| *c == chat_id) {
            self.selected = index;
        }
    }

    fn toggle_archive(&mut self) {
        let Some(chat_id) = self.selected_chat_id() else {
            return;
        };
        if let Some(chat) = self.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.is_archived = !chat.is_archived;
            chat.pinned = false;
        }
        if let Some(index) = self.visible_order().iter().position(|c| *c == chat_id) {
            self.selected = index;
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_theme_name();
        if let Err(e) = self.theme_loader.save_theme_name(name) {
            tracing::warn!("failed to persist theme: {e}");
        }
        self.toasts.info(format!("Theme: {name}"));
    }

    // ---- input -------------------------------------------------------------

    pub async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.dialog.is_open() {
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => self.dialog.toggle_selection(),
                KeyCode::Enter => {
                    self.dialog.execute_selected();
                    self.resolve_dialog();
                }
                KeyCode::Esc => {
                    self.dialog.cancel();
                    self.resolve_dialog();
                }
                _ => {}
            }
            return;
        }

        match self.view {
            View::Login => self.handle_login_key(key, ctrl).await,
            View::Signup => self.handle_signup_key(key, ctrl).await,
            View::Chat => self.handle_chat_key(key, ctrl),
            View::Dashboard => self.handle_dashboard_key(key, ctrl),
            View::Help => {
                self.view = self.previous_view;
            }
        }
    }

    fn resolve_dialog(&mut self) {
        match self.dialog.take_result() {
            DialogResult::Confirmed => {
                if let Some(chat_id) = self.pending_delete.take() {
                    spawn_delete_chat(self.chat_api.clone(), self.tx.clone(), chat_id);
                }
            }
            DialogResult::Cancelled => {
                self.pending_delete = None;
            }
            DialogResult::Pending => {}
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('n') if ctrl => {
                self.view = View::Signup;
            }
            KeyCode::Tab | KeyCode::Down => self.login.next_field(),
            KeyCode::Up => self.login.next_field(),
            KeyCode::Enter => self.submit_login().await,
            KeyCode::Backspace => self.login.focused_field().backspace(),
            KeyCode::Char(c) if !ctrl => self.login.focused_field().push(c),
            _ => {}
        }
    }

    async fn handle_signup_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc => {
                self.view = View::Login;
            }
            KeyCode::Tab | KeyCode::Down => self.signup.next_field(),
            KeyCode::Enter => self.submit_signup().await,
            KeyCode::Backspace => self.signup.focused_field().backspace(),
            KeyCode::Char(c) if !ctrl => self.signup.focused_field().push(c),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        if self.search.active {
            match key.code {
                KeyCode::Esc => self.search.close(),
                KeyCode::Enter => self.open_search_result(),
                KeyCode::Down => self.search.select_next(),
                KeyCode::Up => self.search.select_prev(),
                KeyCode::Backspace => self.search.backspace(),
                KeyCode::Char(c) if !ctrl => self.search.type_char(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.previous_view = self.view;
                self.view = View::Help;
            }
            KeyCode::Char('n') if ctrl => self.new_chat(),
            KeyCode::Char('f') if ctrl => self.search.open(),
            KeyCode::Char('d') if ctrl => self.request_delete(),
            KeyCode::Char('p') if ctrl => self.toggle_pin(),
            KeyCode::Char('e') if ctrl => self.toggle_archive(),
            KeyCode::Char('t') if ctrl => self.cycle_theme(),
            KeyCode::Char('b') if ctrl => self.enter_dashboard(),
            KeyCode::Char('l') if ctrl => self.logout(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.send_current_message(),
            KeyCode::Backspace => self.composer.input.backspace(),
            KeyCode::Char(c) if !ctrl => self.composer.input.push(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') if ctrl || key.code == KeyCode::Esc => {
                self.view = View::Chat;
            }
            KeyCode::F(1) => {
                self.previous_view = self.view;
                self.view = View::Help;
            }
            KeyCode::Char('r') => {
                self.dashboard_loading = LoadingState::Loading;
                spawn_fetch_dashboard(self.dashboard_api.clone(), self.tx.clone());
            }
            KeyCode::Char('t') if ctrl => self.cycle_theme(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_core::{MessageBody, PulseError, Sender};

    fn test_app() -> App {
        let dir = tempfile::tempdir().unwrap().into_path();
        App::new(PulseConfig::default(), dir.join("token")).unwrap()
    }

    fn chat(id: i64, title: &str) -> Chat {
        Chat {
            id,
            title: title.to_string(),
            is_archived: false,
            created_at: Utc::now(),
            pinned: false,
        }
    }

    fn message(id: i64, sender: Sender, text: &str) -> Message {
        Message {
            id,
            sender,
            body: MessageBody::Text(text.to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_stale_messages_result_is_discarded() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "First"), chat(2, "Second")])));
        // Loading the list auto-selects the first chat; move to the second
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 2,
            result: Ok(vec![]),
        });
        app.active_chat = Some(2);

        // A slow fetch for chat 1 lands after the switch
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![message(10, Sender::User, "old chat content")]),
        });

        assert!(app.messages.is_empty(), "stale transcript must not render");
        // It still warms the cache for search
        assert!(app.cache.contains(1));
    }

    #[tokio::test]
    async fn test_matching_messages_result_is_applied() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "First")])));
        assert_eq!(app.active_chat, Some(1));

        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![message(10, Sender::User, "hello")]),
        });
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages_loading, LoadingState::Success);
    }

    #[tokio::test]
    async fn test_deleting_active_chat_selects_another() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "First"), chat(2, "Second")])));
        assert_eq!(app.active_chat, Some(1));

        app.apply_event(AppEvent::ChatDeleted {
            chat_id: 1,
            result: Ok(()),
        });

        assert_eq!(app.active_chat, Some(2));
        assert_eq!(app.messages_loading, LoadingState::Loading);
        assert!(!app.cache.contains(1));
    }

    #[tokio::test]
    async fn test_deleting_last_chat_clears_selection() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Only")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![message(10, Sender::User, "hi")]),
        });

        app.apply_event(AppEvent::ChatDeleted {
            chat_id: 1,
            result: Ok(()),
        });

        assert_eq!(app.active_chat, None);
        assert!(app.messages.is_empty());
        assert!(app.chats.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_inactive_chat_keeps_view() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "First"), chat(2, "Second")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![message(10, Sender::User, "keep me")]),
        });

        app.apply_event(AppEvent::ChatDeleted {
            chat_id: 2,
            result: Ok(()),
        });

        assert_eq!(app.active_chat, Some(1));
        assert_eq!(app.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_rename_updates_sidebar_title() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, DEFAULT_TITLE)])));

        app.apply_event(AppEvent::ChatRenamed {
            chat_id: 1,
            result: Ok(chat(1, "Quarterly sales questions")),
        });

        assert_eq!(app.chats[0].title, "Quarterly sales questions");
    }

    #[tokio::test]
    async fn test_assistant_reply_ends_typing_state() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Chat")])));
        app.typing_chat = Some(1);
        app.composer.busy = true;

        app.apply_event(AppEvent::AssistantReply {
            chat_id: 1,
            result: Ok(message(20, Sender::Ai, "analysis done")),
        });

        assert_eq!(app.typing_chat, None);
        assert!(!app.composer.busy);
        assert_eq!(app.messages.last().unwrap().id, 20);
    }

    #[tokio::test]
    async fn test_reply_for_other_chat_keeps_transcript_clean() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "A"), chat(2, "B")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![]),
        });

        app.apply_event(AppEvent::AssistantReply {
            chat_id: 2,
            result: Ok(message(30, Sender::Ai, "for chat two")),
        });

        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_unlocks_composer() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Chat")])));
        app.typing_chat = Some(1);
        app.composer.busy = true;

        app.apply_event(AppEvent::SendFailed {
            chat_id: 1,
            error: PulseError::ServiceUnavailable("down".to_string()),
        });

        assert_eq!(app.typing_chat, None);
        assert!(!app.composer.busy);
        assert!(!app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_sent_message_appears_before_the_backend_stores_it() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Chat")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![]),
        });

        app.composer.input.value = "how did Q3 land?".to_string();
        app.send_current_message();

        assert_eq!(app.messages.len(), 1);
        assert!(app.messages[0].is_user());
        assert!(app.composer.busy);

        // The stored row replaces the provisional entry, not duplicates it
        app.apply_event(AppEvent::UserMessageStored {
            chat_id: 1,
            message: message(15, Sender::User, "how did Q3 land?"),
        });
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].id, 15);
    }

    #[tokio::test]
    async fn test_failed_send_restores_text_to_composer() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Chat")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![]),
        });

        app.composer.input.value = "quarterly numbers".to_string();
        app.send_current_message();

        app.apply_event(AppEvent::SendFailed {
            chat_id: 1,
            error: PulseError::ServiceUnavailable("down".to_string()),
        });

        assert!(app.messages.is_empty());
        assert_eq!(app.composer.input.value, "quarterly numbers");
        assert!(!app.composer.busy);
        assert_eq!(app.typing_chat, None);
    }

    #[tokio::test]
    async fn test_failure_after_store_keeps_transcript_and_composer() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Chat")])));
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 1,
            result: Ok(vec![]),
        });

        app.composer.input.value = "stored fine".to_string();
        app.send_current_message();
        app.apply_event(AppEvent::UserMessageStored {
            chat_id: 1,
            message: message(16, Sender::User, "stored fine"),
        });

        // The analysis step failing must not resurrect the already-stored text
        app.apply_event(AppEvent::SendFailed {
            chat_id: 1,
            error: PulseError::Timeout,
        });

        assert_eq!(app.messages.len(), 1);
        assert!(app.composer.input.is_empty());
    }

    #[tokio::test]
    async fn test_created_chat_closes_search() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "A")])));
        app.search.open();
        app.search.query = "budget".to_string();

        app.apply_event(AppEvent::ChatCreated(Ok(chat(2, DEFAULT_TITLE))));

        assert!(!app.search.active);
        assert_eq!(app.active_chat, Some(2));
    }

    #[tokio::test]
    async fn test_pinned_chats_sort_first() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![
            chat(1, "A"),
            chat(2, "B"),
            chat(3, "C"),
        ])));

        app.selected = 2;
        app.toggle_pin();

        let order: Vec<i64> = app.visible_chats().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        // Selection followed the pinned chat to the top
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_archived_chats_sort_last() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![
            chat(1, "A"),
            chat(2, "B"),
            chat(3, "C"),
        ])));

        app.selected = 0;
        app.toggle_archive();

        let order: Vec<i64> = app.visible_chats().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_pin_survives_chat_list_refresh() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "A"), chat(2, "B")])));
        app.selected = 1;
        app.toggle_pin();

        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "A"), chat(2, "B")])));
        assert!(app.chats.iter().find(|c| c.id == 2).unwrap().pinned);
    }

    #[tokio::test]
    async fn test_search_result_navigation_sets_highlight() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "A"), chat(2, "B")])));
        app.cache.insert(
            2,
            vec![message(42, Sender::User, "find the needle here")],
        );

        app.search.open();
        app.search.query = "needle".to_string();
        app.run_search();
        assert_eq!(app.search.results.len(), 1);

        app.open_search_result();
        assert_eq!(app.active_chat, Some(2));
        assert!(!app.search.active);

        // Highlight arms once the transcript lands
        app.apply_event(AppEvent::MessagesLoaded {
            chat_id: 2,
            result: Ok(vec![message(42, Sender::User, "find the needle here")]),
        });
        assert_eq!(app.highlight.map(|(id, _)| id), Some(42));
    }

    #[tokio::test]
    async fn test_search_with_no_matches_is_empty() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Budget")])));
        app.cache.insert(1, vec![message(1, Sender::User, "hello")]);

        app.search.open();
        app.search.query = "zzz-no-such-text".to_string();
        app.run_search();

        assert!(app.search.results.is_empty());
    }

    #[tokio::test]
    async fn test_dialog_cancel_keeps_chat() {
        let mut app = test_app();
        app.apply_event(AppEvent::ChatsLoaded(Ok(vec![chat(1, "Keep me")])));

        app.request_delete();
        assert!(app.dialog.is_open());

        app.dialog.cancel();
        app.resolve_dialog();
        assert_eq!(app.chats.len(), 1);
        assert!(app.pending_delete.is_none());
    }
}
