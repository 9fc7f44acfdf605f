//! Base HTTP client for the PulseAI backend.
//!
//! Holds the bearer token in a shared slot so every request picks it up
//! automatically; the session store writes the slot, the facades never touch
//! tokens at all.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PulseError, PulseResult};

/// FastAPI error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PulseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PulseError::Internal(format!("failed to build HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Installs the bearer token attached to all subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token slot poisoned") = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("token slot poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token slot poisoned").is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.token.read().expect("token slot poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn check(&self, builder: RequestBuilder) -> PulseResult<reqwest::Response> {
        let response = builder.send().await.map_err(PulseError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| status.to_string());

        debug!(status = %status, "request failed: {detail}");
        Err(map_status(status, detail))
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> PulseResult<T> {
        self.check(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| PulseError::ApiParseError(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PulseResult<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> PulseResult<T> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> PulseResult<T> {
        self.execute(self.request(Method::PATCH, path).json(body))
            .await
    }

    /// `DELETE` ignores the response body; the backend's is not stable
    /// across versions.
    pub async fn delete(&self, path: &str) -> PulseResult<()> {
        self.check(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

fn map_status(status: StatusCode, detail: String) -> PulseError {
    match status {
        StatusCode::UNAUTHORIZED => PulseError::Unauthorized(detail),
        StatusCode::FORBIDDEN => PulseError::Unauthorized(detail),
        StatusCode::NOT_FOUND => PulseError::ChatNotFound(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            PulseError::InvalidMessage(detail)
        }
        s if s.is_server_error() => PulseError::ServiceUnavailable(detail),
        _ => PulseError::RequestFailed(format!("{status}: {detail}")),
    }
}
