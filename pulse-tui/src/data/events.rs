//! Events emitted by background tasks back into the UI loop.
//!
//! Every fetch carries the chat id it was issued for, so the reducer can
//! drop results that arrive after the user has already moved on.

use pulse_core::{
    Chat, DashboardStats, Message, PulseError, PulseResult, RiskDistribution, TopicFrequency,
    TrendPoint,
};
use tokio::sync::mpsc::UnboundedSender;

pub type EventSender = UnboundedSender<AppEvent>;

/// All four dashboard fetches, delivered together.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub trends: Vec<TrendPoint>,
    pub risk: RiskDistribution,
    pub topics: Vec<TopicFrequency>,
}

#[derive(Debug)]
pub enum AppEvent {
    ChatsLoaded(PulseResult<Vec<Chat>>),

    ChatCreated(PulseResult<Chat>),

    MessagesLoaded {
        chat_id: i64,
        result: PulseResult<Vec<Message>>,
    },

    /// The user's message was stored; the analysis is still running.
    UserMessageStored {
        chat_id: i64,
        message: Message,
    },

    /// The assistant's reply was stored, ending the typing indicator.
    AssistantReply {
        chat_id: i64,
        result: PulseResult<Message>,
    },

    ChatRenamed {
        chat_id: i64,
        result: PulseResult<Chat>,
    },

    ChatDeleted {
        chat_id: i64,
        result: PulseResult<()>,
    },

    /// A transcript fetched to satisfy the cross-chat search cache.
    SearchMessagesLoaded {
        chat_id: i64,
        result: PulseResult<Vec<Message>>,
    },

    DashboardLoaded(PulseResult<DashboardData>),

    /// The send pipeline failed before a reply could be produced.
    SendFailed {
        chat_id: i64,
        error: PulseError,
    },
}
