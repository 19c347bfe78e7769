//! Client error types

use http::StatusCode;
use serde::Deserialize;
use shared::EnvelopeError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Shown when neither the backend nor the error itself says anything useful
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Error body returned by the backend on non-2xx responses
///
/// Every field is optional; Spring-style bodies carry `title`, the
/// platform's own handlers carry `message` and sometimes a numeric `code`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `body` is empty unless the backend sent a JSON error
    #[error("Request failed with status code {}", .status.as_u16())]
    Api { status: StatusCode, body: ApiErrorBody },

    /// Enveloped response with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request URL could not be built
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a failed response to an error
    ///
    /// Only a JSON object body is kept. Anything else (proxy HTML, plain
    /// text) is logged and dropped, so the operator sees the status message.
    pub fn from_response(status: StatusCode, text: String) -> Self {
        let body = serde_json::from_str::<ApiErrorBody>(&text).unwrap_or_else(|_| {
            tracing::debug!(status = status.as_u16(), body = %text, "Non-JSON error body");
            ApiErrorBody::default()
        });
        ClientError::Api { status, body }
    }

    /// HTTP status of the failed response, when there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Operator-facing text
    ///
    /// Body `message`, then body `title`, then this error's own message,
    /// then [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        if let ClientError::Api { body, .. } = self {
            let from_body = [body.message.as_deref(), body.title.as_deref()]
                .into_iter()
                .flatten()
                .find(|s| !s.trim().is_empty());
            if let Some(text) = from_body {
                return text.to_string();
            }
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            own
        }
    }

    /// Unified error code for this failure
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClientError::Api { status, body } => body
                .code
                .and_then(|c| ErrorCode::try_from(c).ok())
                .filter(|c| !c.is_success())
                .unwrap_or_else(|| ErrorCode::from_status(*status)),
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(e) => match e.status() {
                Some(status) => ErrorCode::from_status(status),
                None => ErrorCode::NetworkError,
            },
            ClientError::Rejected(_) => ErrorCode::InvalidRequest,
            ClientError::Url(_) => ErrorCode::ConfigError,
            ClientError::InvalidResponse(_)
            | ClientError::Internal(_)
            | ClientError::Serialization(_) => ErrorCode::InternalError,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected { .. } => ClientError::Rejected(err.to_string()),
            EnvelopeError::Shape(e) => ClientError::InvalidResponse(e.to_string()),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let mut app = AppError::with_message(err.error_code(), err.user_message());
        if let Some(status) = err.status() {
            app = app.with_detail("status", status.as_u16());
        }
        app
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
