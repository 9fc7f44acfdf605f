//! Typed facades over the PulseAI HTTP API.

pub mod auth;
pub mod chats;
pub mod dashboard;
pub mod http;

pub use auth::AuthApi;
pub use chats::ChatApi;
pub use dashboard::DashboardApi;
pub use http::ApiClient;
