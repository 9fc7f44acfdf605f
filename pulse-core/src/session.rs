//! Authenticated session lifecycle.
//!
//! A session owns the token file on disk and the token slot inside
//! [`ApiClient`]; the two are kept in lockstep. Restore-on-startup probes
//! `/auth/me` so a stale token degrades to the login screen instead of a
//! wall of 401s later.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::api::{ApiClient, AuthApi};
use crate::error::{PulseError, PulseResult};
use crate::models::{Credentials, SignupRequest, UserProfile};

#[derive(Debug)]
pub struct SessionStore {
    client: ApiClient,
    auth: AuthApi,
    token_path: PathBuf,
    user: Option<UserProfile>,
}

impl SessionStore {
    pub fn new(client: ApiClient, token_path: PathBuf) -> Self {
        let auth = AuthApi::new(client.clone());
        Self {
            client,
            auth,
            token_path,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Attempts to resume the previous session from the persisted token.
    ///
    /// Returns `Ok(None)` when no token is stored or the stored one is no
    /// longer accepted; a rejected token is deleted so the next startup
    /// skips the probe.
    pub async fn restore(&mut self) -> PulseResult<Option<UserProfile>> {
        let token = match fs::read_to_string(&self.token_path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    return Ok(None);
                }
                token
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.client.set_token(token);
        match self.auth.me().await {
            Ok(user) => {
                info!(username = %user.username, "session restored");
                self.user = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) if e.is_auth_error() => {
                debug!("stored token rejected, clearing it");
                self.client.clear_token();
                self.discard_token_file();
                Ok(None)
            }
            Err(e) => {
                // Network trouble says nothing about the token; keep it.
                self.client.clear_token();
                Err(e)
            }
        }
    }

    /// Exchanges credentials for a token, persists it, and loads the
    /// profile.
    pub async fn login(&mut self, credentials: &Credentials) -> PulseResult<UserProfile> {
        let token = self.auth.login(credentials).await.map_err(|e| {
            if e.is_auth_error() {
                PulseError::InvalidCredentials("incorrect email or password".to_string())
            } else {
                e
            }
        })?;
        self.adopt_token(token.access_token).await
    }

    /// Creates the account and lands in an authenticated session.
    pub async fn signup(&mut self, request: &SignupRequest) -> PulseResult<UserProfile> {
        let token = self.auth.signup(request).await?;
        self.adopt_token(token.access_token).await
    }

    /// Installs an already-issued token, e.g. one supplied out of band.
    pub async fn login_with_token(&mut self, token: String) -> PulseResult<UserProfile> {
        self.adopt_token(token).await
    }

    /// Drops the in-memory session and the persisted token.
    pub fn logout(&mut self) {
        self.user = None;
        self.client.clear_token();
        self.discard_token_file();
        info!("logged out");
    }

    async fn adopt_token(&mut self, token: String) -> PulseResult<UserProfile> {
        self.client.set_token(token.clone());
        let user = self.auth.me().await?;
        self.persist_token(&token);
        self.user = Some(user.clone());
        Ok(user)
    }

    fn persist_token(&self, token: &str) {
        if let Some(parent) = self.token_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("failed to create token directory: {e}");
                return;
            }
        }
        if let Err(e) = fs::write(&self.token_path, token) {
            // Persistence is best-effort; the live session still works.
            warn!("failed to persist token: {e}");
        }
    }

    fn discard_token_file(&self) {
        match fs::remove_file(&self.token_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove token file: {e}"),
        }
    }
}
