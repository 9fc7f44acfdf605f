mod events;
mod state;
mod tasks;

pub use events::{AppEvent, DashboardData, EventSender};
pub use state::{
    ComposerState, InputField, LoadingState, LoginState, SearchState, SignupState,
};
pub use tasks::{
    spawn_create_chat, spawn_delete_chat, spawn_fetch_dashboard, spawn_fetch_messages,
    spawn_fetch_search_messages, spawn_load_chats, spawn_send_pipeline,
};
