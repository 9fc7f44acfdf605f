//! Session lifecycle tests: login, signup, restore, and logout against a
//! mock backend with a temp-dir token file.

use std::time::Duration;

use pulse_core::{ApiClient, Credentials, PulseError, SessionStore, SignupRequest};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer, dir: &TempDir) -> SessionStore {
    let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    SessionStore::new(client, dir.path().join("token"))
}

async fn mount_me(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", format!("Bearer {token}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"username": "khutso", "email": "khutso@example.com"}
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_persists_token_and_loads_profile() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(serde_json::json!(
            {"email": "khutso@example.com", "password": "hunter2"}
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"access_token": "tok-123", "token_type": "bearer"}
        )))
        .mount(&server)
        .await;
    mount_me(&server, "tok-123").await;

    let mut session = session_for(&server, &dir);
    let user = session
        .login(&Credentials {
            email: "khutso@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.username, "khutso");
    assert!(session.is_authenticated());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("token")).unwrap(),
        "tok-123"
    );
}

#[tokio::test]
async fn test_login_rejection_maps_to_invalid_credentials() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let mut session = session_for(&server, &dir);
    let err = session
        .login(&Credentials {
            email: "khutso@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PulseError::InvalidCredentials(_)));
    assert!(!session.is_authenticated());
    assert!(!dir.path().join("token").exists());
}

#[tokio::test]
async fn test_signup_lands_in_authenticated_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_partial_json(serde_json::json!({"username": "khutso"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"access_token": "tok-new", "token_type": "bearer"}
        )))
        .mount(&server)
        .await;
    mount_me(&server, "tok-new").await;

    let mut session = session_for(&server, &dir);
    let user = session
        .signup(&SignupRequest {
            username: "khutso".to_string(),
            email: "khutso@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.email, "khutso@example.com");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-stored").unwrap();

    mount_me(&server, "tok-stored").await;

    let mut session = session_for(&server, &dir);
    let user = session.restore().await.unwrap();

    assert_eq!(user.unwrap().username, "khutso");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_restore_with_rejected_token_clears_it() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-stale").unwrap();

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;

    let mut session = session_for(&server, &dir);
    let restored = session.restore().await.unwrap();

    assert!(restored.is_none());
    assert!(!session.is_authenticated());
    // The stale token is gone so the next startup skips the probe
    assert!(!dir.path().join("token").exists());
}

#[tokio::test]
async fn test_restore_without_token_is_a_clean_miss() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut session = session_for(&server, &dir);
    assert!(session.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_drops_session_and_token_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-stored").unwrap();

    mount_me(&server, "tok-stored").await;

    let mut session = session_for(&server, &dir);
    session.restore().await.unwrap();
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(!dir.path().join("token").exists());
}
