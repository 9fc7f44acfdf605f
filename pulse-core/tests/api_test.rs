//! Integration tests for the HTTP facades against a mock backend.

use std::time::Duration;

use pulse_core::{
    AnalyzeResponse, ApiClient, ChatApi, DashboardApi, MessageBody, NewMessage, PulseError, Sender,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_bearer_token_attached_to_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/chats"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("secret-token");

    let chats = ChatApi::new(client).list_chats().await.unwrap();
    assert!(chats.is_empty());
}

#[tokio::test]
async fn test_list_chats_parses_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 2, "title": "Feedback triage", "is_archived": false,
             "created_at": "2025-02-11T08:30:00"},
            {"id": 1, "title": "New Chat", "is_archived": true,
             "created_at": "2025-02-10T09:00:00"}
        ])))
        .mount(&server)
        .await;

    let chats = ChatApi::new(client_for(&server)).list_chats().await.unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0].id, 2);
    assert_eq!(chats[0].title, "Feedback triage");
    assert!(chats[1].is_archived);
}

#[tokio::test]
async fn test_create_and_rename_chat() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analysis/chats"))
        .and(body_partial_json(serde_json::json!({"title": "New Chat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"id": 7, "title": "New Chat", "is_archived": false,
             "created_at": "2025-02-11T08:30:00"}
        )))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/analysis/chats/7/title"))
        .and(body_partial_json(serde_json::json!({"title": "Roadmap questions"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"id": 7, "title": "Roadmap questions", "is_archived": false,
             "created_at": "2025-02-11T08:30:00"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let api = ChatApi::new(client_for(&server));
    let chat = api.create_chat("New Chat").await.unwrap();
    assert_eq!(chat.id, 7);

    let renamed = api.rename_chat(7, "Roadmap questions").await.unwrap();
    assert_eq!(renamed.title, "Roadmap questions");
}

#[tokio::test]
async fn test_get_messages_normalizes_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/chats/3/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "role": "user", "content": "how are sales trending?",
             "risk": 0, "created_at": "2025-02-11T08:30:00"},
            {"id": 2, "role": "ai",
             "content": "{\"summary\":\"Sales are trending upward\",\"risk\":0}",
             "risk": 0, "created_at": "2025-02-11T08:30:05"},
            {"id": 3, "role": "ai",
             "content": {"summary": "Follow-up detail", "topics": ["sales"]},
             "risk": 1, "created_at": "2025-02-11T08:31:00"}
        ])))
        .mount(&server)
        .await;

    let messages = ChatApi::new(client_for(&server))
        .get_messages(3)
        .await
        .unwrap();
    assert_eq!(messages.len(), 3);

    assert_eq!(messages[0].sender, Sender::User);
    assert!(matches!(messages[0].body, MessageBody::Text(_)));

    // Stringified JSON content comes back structured, never a raw dump
    match &messages[1].body {
        MessageBody::Analysis(payload) => {
            assert_eq!(payload.summary.as_deref(), Some("Sales are trending upward"));
        }
        MessageBody::Text(_) => panic!("stringified analysis should normalize"),
    }

    // Row-level risk backfills a payload that carried none
    match &messages[2].body {
        MessageBody::Analysis(payload) => assert_eq!(payload.risk, Some(1)),
        MessageBody::Text(_) => panic!("expected analysis body"),
    }
}

#[tokio::test]
async fn test_send_message_forwards_structured_content_as_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analysis/chats/3/messages"))
        .and(body_partial_json(serde_json::json!({
            "role": "ai",
            "content": {"summary": "Mostly positive"},
            "risk": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"id": 9, "role": "ai", "content": {"summary": "Mostly positive"},
             "risk": 0, "created_at": "2025-02-11T08:32:00"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let body = MessageBody::Analysis(pulse_core::AnalysisPayload {
        summary: Some("Mostly positive".to_string()),
        ..Default::default()
    });
    let stored = ChatApi::new(client_for(&server))
        .send_message(3, &NewMessage::assistant(body))
        .await
        .unwrap();
    assert_eq!(stored.id, 9);
}

#[tokio::test]
async fn test_analyze_both_response_kinds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analysis/"))
        .and(body_partial_json(serde_json::json!({"text": "hi there", "chat_id": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"type": "human_response", "response": "Hello! What should I analyze?"}
        )))
        .mount(&server)
        .await;

    let api = ChatApi::new(client_for(&server));
    match api.analyze("hi there", Some(3)).await.unwrap() {
        AnalyzeResponse::Human { response } => {
            assert_eq!(response, "Hello! What should I analyze?")
        }
        AnalyzeResponse::Analysis { .. } => panic!("expected a conversational reply"),
    }

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/analysis/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "analysis_response",
            "summary": "Negative feedback about checkout",
            "sentiment": {"sentiment": "NEGATIVE", "confidence": 0.88},
            "topics": ["checkout", "payments"],
            "feedback": "Investigate the payment provider",
            "risk": 1,
            "id": 41,
            "created_at": "2025-02-11T08:33:00"
        })))
        .mount(&server)
        .await;

    match api.analyze("checkout keeps failing", Some(3)).await.unwrap() {
        AnalyzeResponse::Analysis { payload, id, .. } => {
            assert_eq!(id, Some(41));
            assert!(payload.risk_flagged());
            assert_eq!(payload.topics, vec!["checkout", "payments"]);
        }
        AnalyzeResponse::Human { .. } => panic!("expected a structured analysis"),
    }
}

#[tokio::test]
async fn test_delete_missing_chat_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/analysis/chats/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Chat not found"})),
        )
        .mount(&server)
        .await;

    let err = ChatApi::new(client_for(&server))
        .delete_chat(99)
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::ChatNotFound(_)));
    assert_eq!(err.error_code(), "E4001");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/chats"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;

    let err = ChatApi::new(client_for(&server))
        .list_chats()
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_dashboard_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"total_analyses": 128, "avg_sentiment": 72.5, "risk_alerts": 4,
             "topics_analyzed": 31}
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/analysis/dashboard/sentiment-trends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"label": "Jan", "score": 61.0},
            {"label": "Feb", "score": 72.5}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/analysis/dashboard/risk-distribution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"low": 90, "medium": 30, "high": 8}
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/analysis/dashboard/topics-frequency"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"topic": "billing", "count": 42},
            {"topic": "onboarding", "count": 17}
        ])))
        .mount(&server)
        .await;

    let api = DashboardApi::new(client_for(&server));

    let stats = api.stats().await.unwrap();
    assert_eq!(stats.total_analyses, 128);
    assert_eq!(stats.risk_alerts, 4);

    let trends = api.sentiment_trends().await.unwrap();
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[1].label, "Feb");

    let dist = api.risk_distribution().await.unwrap();
    assert_eq!(dist.total(), 128);

    let topics = api.topics_frequency().await.unwrap();
    assert_eq!(topics[0].topic, "billing");
}

#[tokio::test]
async fn test_history_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analysis/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 5, "text": "sales question", "sentiment": "POSITIVE",
             "confidence": 0.91, "created_at": "2025-02-11T08:00:00"}
        ])))
        .mount(&server)
        .await;

    let history = ChatApi::new(client_for(&server)).history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sentiment, "POSITIVE");
}
