//! Error types for the PulseAI client library.
//!
//! Every fallible operation in this crate returns [`PulseResult`]. The
//! variants map onto the client's error policy: auth errors force a logout,
//! network errors become inline messages with no automatic retry, not-found
//! errors surface as action failures, and parse errors on message content
//! fall back to plain text without ever reaching the user.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Auth | Credentials, token expiry, missing session |
//! | E2001-E2099 | Config | Config file and validation errors |
//! | E3001-E3099 | Network | Request, connect, and timeout errors |
//! | E4001-E4099 | Chat | Missing chats/messages, invalid payloads |
//! | E5001-E5099 | Parse | Malformed structured message content |
//! | E9001-E9099 | General | Internal, IO, serialization errors |

use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the PulseAI client library.
#[derive(Debug, Error)]
pub enum PulseError {
    // ========================================================================
    // Auth Errors (E1001-E1099)
    // ========================================================================
    /// Backend rejected the supplied credentials
    #[error("[E1001] Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Token was rejected (expired or revoked); the session must be cleared
    #[error("[E1002] Session expired or token rejected: {0}")]
    Unauthorized(String),

    /// An operation that needs a session was attempted without one
    #[error("[E1003] Not logged in")]
    NotAuthenticated,

    // ========================================================================
    // Configuration Errors (E2001-E2099)
    // ========================================================================
    /// Configuration file parse error
    #[error("[E2001] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value
    #[error("[E2002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Network Errors (E3001-E3099)
    // ========================================================================
    /// Request reached the backend but failed
    #[error("[E3001] Request failed: {0}")]
    RequestFailed(String),

    /// Could not reach the backend at all
    #[error("[E3002] Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timed out
    #[error("[E3003] Request timed out")]
    Timeout,

    /// Response body could not be decoded as the expected shape
    #[error("[E3004] Failed to parse API response: {0}")]
    ApiParseError(String),

    // ========================================================================
    // Chat Errors (E4001-E4099)
    // ========================================================================
    /// Chat does not exist or does not belong to the caller
    #[error("[E4001] Chat not found: {0}")]
    ChatNotFound(String),

    /// Backend rejected a message payload
    #[error("[E4002] Invalid message: {0}")]
    InvalidMessage(String),

    // ========================================================================
    // Parse Errors (E5001-E5099)
    // ========================================================================
    /// Structured message content failed to parse; callers fall back to text
    #[error("[E5001] Malformed structured content: {0}")]
    ContentParseError(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// Internal error (catch-all for unexpected conditions)
    #[error("[E9001] Internal error: {0}")]
    Internal(String),

    /// IO error (token file, theme preference file)
    #[error("[E9002] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E9003] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for PulseAI client operations.
pub type PulseResult<T> = Result<T, PulseError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for PulseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PulseError::Timeout
        } else if err.is_connect() {
            PulseError::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            PulseError::ApiParseError(err.to_string())
        } else if err.is_status() {
            match err.status().map(|s| s.as_u16()) {
                Some(401) | Some(403) => PulseError::Unauthorized(err.to_string()),
                Some(404) => PulseError::ChatNotFound(err.to_string()),
                _ => PulseError::RequestFailed(err.to_string()),
            }
        } else {
            PulseError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        PulseError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        PulseError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for PulseError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => PulseError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::FileParse { uri, cause } => PulseError::ConfigParseError(
                format!("Failed to parse {}: {}", uri.unwrap_or_default(), cause),
            ),
            _ => PulseError::ConfigParseError(err.to_string()),
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl PulseError {
    /// Returns true for errors that invalidate the session. The orchestrator
    /// reacts by logging out and returning to the login screen.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            PulseError::InvalidCredentials(_)
                | PulseError::Unauthorized(_)
                | PulseError::NotAuthenticated
        )
    }

    /// Returns true for transport-level failures. Surfaced inline; the user
    /// may retry manually, the client never retries on its own.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            PulseError::RequestFailed(_)
                | PulseError::ServiceUnavailable(_)
                | PulseError::Timeout
                | PulseError::ApiParseError(_)
        )
    }

    /// Returns true when the target chat/message does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PulseError::ChatNotFound(_))
    }

    /// Returns true for content-shape failures that are handled by silent
    /// fallback to plain text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, PulseError::ContentParseError(_))
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            PulseError::InvalidCredentials(_) => "E1001",
            PulseError::Unauthorized(_) => "E1002",
            PulseError::NotAuthenticated => "E1003",
            PulseError::ConfigParseError(_) => "E2001",
            PulseError::InvalidConfigValue { .. } => "E2002",
            PulseError::RequestFailed(_) => "E3001",
            PulseError::ServiceUnavailable(_) => "E3002",
            PulseError::Timeout => "E3003",
            PulseError::ApiParseError(_) => "E3004",
            PulseError::ChatNotFound(_) => "E4001",
            PulseError::InvalidMessage(_) => "E4002",
            PulseError::ContentParseError(_) => "E5001",
            PulseError::Internal(_) => "E9001",
            PulseError::IoError(_) => "E9002",
            PulseError::SerializationError(_) => "E9003",
        }
    }

    /// Returns a short label for the status line.
    pub fn status_indicator(&self) -> &'static str {
        match self {
            e if e.is_auth_error() => "Auth",
            PulseError::Timeout => "Timeout",
            PulseError::ServiceUnavailable(_) => "Offline",
            e if e.is_network_error() => "Network",
            e if e.is_not_found() => "Not found",
            _ => "Error",
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_network_error() {
            warn!(error_code = %code, "Network error: {}", self);
        } else {
            error!(error_code = %code, "Error: {}", self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_code() {
        let err = PulseError::Unauthorized("token expired".to_string());
        assert!(err.to_string().contains("E1002"));
        assert!(err.to_string().contains("token expired"));

        let err = PulseError::ChatNotFound("42".to_string());
        assert!(err.to_string().contains("E4001"));
    }

    #[test]
    fn test_error_categorization() {
        let auth = PulseError::InvalidCredentials("bad password".to_string());
        assert!(auth.is_auth_error());
        assert!(!auth.is_network_error());

        let net = PulseError::Timeout;
        assert!(net.is_network_error());
        assert!(!net.is_auth_error());

        let missing = PulseError::ChatNotFound("7".to_string());
        assert!(missing.is_not_found());
        assert!(!missing.is_network_error());

        let parse = PulseError::ContentParseError("{not json".to_string());
        assert!(parse.is_parse_error());
        assert!(!parse.is_network_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PulseError::NotAuthenticated.error_code(), "E1003");
        assert_eq!(PulseError::Timeout.error_code(), "E3003");
        assert_eq!(
            PulseError::ChatNotFound("1".to_string()).error_code(),
            "E4001"
        );
        assert_eq!(
            PulseError::Internal("oops".to_string()).error_code(),
            "E9001"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PulseError = json_err.into();
        assert!(matches!(err, PulseError::SerializationError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing token file");
        let err: PulseError = io_err.into();
        assert!(matches!(err, PulseError::IoError(_)));
    }

    #[test]
    fn test_status_indicator() {
        assert_eq!(PulseError::Timeout.status_indicator(), "Timeout");
        assert_eq!(
            PulseError::Unauthorized("x".to_string()).status_indicator(),
            "Auth"
        );
        assert_eq!(
            PulseError::ServiceUnavailable("x".to_string()).status_indicator(),
            "Offline"
        );
    }
}
