#![allow(
    clippy::needless_borrows_for_generic_args,
    clippy::type_complexity,
    clippy::len_zero,
    dead_code,
    unused_imports
)]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod title;

pub use api::{ApiClient, AuthApi, ChatApi, DashboardApi};
pub use cache::MessageCache;
pub use config::{
    default_token_path, ensure_config_dir, get_config_dir, get_data_dir, ConfigLoadError,
    PulseConfig,
};
pub use error::{PulseError, PulseResult};
pub use models::{
    AnalysisPayload, AnalyzeResponse, Chat, Credentials, DashboardStats, HistoryEntry, Message,
    MessageBody, NewMessage, RiskDistribution, Sender, Sentiment, SignupRequest, TopicFrequency,
    TrendPoint, UserProfile,
};
pub use search::{search, MatchKind, SearchHit};
pub use session::SessionStore;
pub use title::{generate_title, DEFAULT_TITLE};
