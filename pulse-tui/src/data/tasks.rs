//! Background fetch tasks.
//!
//! Each task runs one backend interaction on the runtime and reports back
//! over the event channel; the UI loop never awaits a request directly.

use pulse_core::{ChatApi, DashboardApi, NewMessage};
use tracing::debug;

use super::events::{AppEvent, DashboardData, EventSender};

pub fn spawn_load_chats(api: ChatApi, tx: EventSender) {
    tokio::spawn(async move {
        let result = api.list_chats().await;
        let _ = tx.send(AppEvent::ChatsLoaded(result));
    });
}

pub fn spawn_create_chat(api: ChatApi, tx: EventSender, title: String) {
    tokio::spawn(async move {
        let result = api.create_chat(&title).await;
        let _ = tx.send(AppEvent::ChatCreated(result));
    });
}

pub fn spawn_fetch_messages(api: ChatApi, tx: EventSender, chat_id: i64) {
    tokio::spawn(async move {
        let result = api.get_messages(chat_id).await;
        let _ = tx.send(AppEvent::MessagesLoaded { chat_id, result });
    });
}

/// Runs the full send pipeline: store the user message, retitle a fresh
/// chat, run the analysis, store the reply. Each stage reports as soon as
/// it lands so the transcript updates incrementally.
pub fn spawn_send_pipeline(
    api: ChatApi,
    tx: EventSender,
    chat_id: i64,
    text: String,
    new_title: Option<String>,
) {
    tokio::spawn(async move {
        let message = match api.send_message(chat_id, &NewMessage::user(&text)).await {
            Ok(message) => message,
            Err(error) => {
                let _ = tx.send(AppEvent::SendFailed { chat_id, error });
                return;
            }
        };
        let _ = tx.send(AppEvent::UserMessageStored { chat_id, message });

        if let Some(title) = new_title {
            let result = api.rename_chat(chat_id, &title).await;
            let _ = tx.send(AppEvent::ChatRenamed { chat_id, result });
        }

        let body = match api.analyze(&text, Some(chat_id)).await {
            Ok(response) => response.into_body(),
            Err(error) => {
                let _ = tx.send(AppEvent::SendFailed { chat_id, error });
                return;
            }
        };

        let result = api
            .send_message(chat_id, &NewMessage::assistant(body))
            .await;
        let _ = tx.send(AppEvent::AssistantReply { chat_id, result });
    });
}

pub fn spawn_delete_chat(api: ChatApi, tx: EventSender, chat_id: i64) {
    tokio::spawn(async move {
        let result = api.delete_chat(chat_id).await;
        let _ = tx.send(AppEvent::ChatDeleted { chat_id, result });
    });
}

/// Fetches a transcript for the search cache; distinct from
/// [`spawn_fetch_messages`] so stale-view filtering never confuses the two.
pub fn spawn_fetch_search_messages(api: ChatApi, tx: EventSender, chat_id: i64) {
    tokio::spawn(async move {
        debug!(chat_id, "fetching transcript for search");
        let result = api.get_messages(chat_id).await;
        let _ = tx.send(AppEvent::SearchMessagesLoaded { chat_id, result });
    });
}

pub fn spawn_fetch_dashboard(api: DashboardApi, tx: EventSender) {
    tokio::spawn(async move {
        let result = async {
            Ok(DashboardData {
                stats: api.stats().await?,
                trends: api.sentiment_trends().await?,
                risk: api.risk_distribution().await?,
                topics: api.topics_frequency().await?,
            })
        }
        .await;
        let _ = tx.send(AppEvent::DashboardLoaded(result));
    });
}
