//! `/analysis/*` chat and analysis endpoints.
//!
//! This facade is the only place raw wire messages exist; everything it
//! returns is already normalized into [`Message`] display shapes.

use tracing::{debug, info};

use crate::error::PulseResult;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, Chat, ChatTitle, HistoryEntry, Message, NewMessage,
    RawMessage,
};

use super::http::ApiClient;

#[derive(Debug, Clone)]
pub struct ChatApi {
    client: ApiClient,
}

impl ChatApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /analysis/chats`: the caller's chats, newest first.
    pub async fn list_chats(&self) -> PulseResult<Vec<Chat>> {
        let chats: Vec<Chat> = self.client.get("/analysis/chats").await?;
        debug!(count = chats.len(), "fetched chat list");
        Ok(chats)
    }

    /// `POST /analysis/chats` with the placeholder title. The real title is
    /// derived later from the first user message.
    pub async fn create_chat(&self, title: &str) -> PulseResult<Chat> {
        let chat: Chat = self
            .client
            .post("/analysis/chats", &ChatTitle::new(title))
            .await?;
        info!(chat_id = chat.id, "created chat");
        Ok(chat)
    }

    /// `GET /analysis/chats/{id}/messages`, normalized.
    pub async fn get_messages(&self, chat_id: i64) -> PulseResult<Vec<Message>> {
        let raw: Vec<RawMessage> = self
            .client
            .get(&format!("/analysis/chats/{chat_id}/messages"))
            .await?;
        Ok(raw.into_iter().map(Message::from_raw).collect())
    }

    /// `POST /analysis/chats/{id}/messages`. Structured assistant content
    /// goes over the wire as an object, exactly as it will be read back.
    pub async fn send_message(&self, chat_id: i64, message: &NewMessage) -> PulseResult<Message> {
        let raw: RawMessage = self
            .client
            .post(&format!("/analysis/chats/{chat_id}/messages"), message)
            .await?;
        Ok(Message::from_raw(raw))
    }

    /// `DELETE /analysis/chats/{id}`.
    pub async fn delete_chat(&self, chat_id: i64) -> PulseResult<()> {
        self.client
            .delete(&format!("/analysis/chats/{chat_id}"))
            .await?;
        info!(chat_id, "deleted chat");
        Ok(())
    }

    /// `PATCH /analysis/chats/{id}/title`.
    pub async fn rename_chat(&self, chat_id: i64, title: &str) -> PulseResult<Chat> {
        self.client
            .patch(
                &format!("/analysis/chats/{chat_id}/title"),
                &ChatTitle::new(title),
            )
            .await
    }

    /// `POST /analysis/`: runs the models over the text and returns either
    /// a conversational reply or a structured analysis.
    pub async fn analyze(&self, text: &str, chat_id: Option<i64>) -> PulseResult<AnalyzeResponse> {
        let request = AnalyzeRequest {
            text: text.to_string(),
            chat_id,
        };
        self.client.post("/analysis/", &request).await
    }

    /// `GET /analysis/history`: the stored analysis feed across all chats.
    pub async fn history(&self) -> PulseResult<Vec<HistoryEntry>> {
        self.client.get("/analysis/history").await
    }
}
