//! `/auth/*` endpoints.

use tracing::info;

use crate::error::PulseResult;
use crate::models::{Credentials, SignupRequest, TokenResponse, UserProfile};

use super::http::ApiClient;

/// Facade over the authentication endpoints. Stateless; the token lives in
/// the [`ApiClient`] slot and is managed by the session store.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/signup`. The backend issues a token right away, so a fresh
    /// signup lands in an authenticated session without a second round trip.
    pub async fn signup(&self, request: &SignupRequest) -> PulseResult<TokenResponse> {
        let token: TokenResponse = self.client.post("/auth/signup", request).await?;
        info!(username = %request.username, "account created");
        Ok(token)
    }

    /// `POST /auth/login`.
    pub async fn login(&self, credentials: &Credentials) -> PulseResult<TokenResponse> {
        self.client.post("/auth/login", credentials).await
    }

    /// `GET /auth/me`. Doubles as the token validity probe on startup.
    pub async fn me(&self) -> PulseResult<UserProfile> {
        self.client.get("/auth/me").await
    }
}
