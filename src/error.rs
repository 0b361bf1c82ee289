//! Unified SDK error types.

use serde::Deserialize;
use thiserror::Error;

/// Message shown when a failure carries nothing displayable.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Timeout")]
    Timeout,
}

impl HttpError {
    /// Raw response body, for variants that carry one.
    pub fn body(&self) -> Option<&str> {
        match self {
            HttpError::ServerError { body, .. }
            | HttpError::NotFound(body)
            | HttpError::BadRequest(body)
            | HttpError::Conflict(body) => Some(body.as_str()),
            _ => None,
        }
    }

    /// Structured error payload parsed from the response body, if it is JSON.
    pub fn payload(&self) -> Option<ErrorPayload> {
        self.body()
            .and_then(|body| serde_json::from_str::<ErrorPayload>(body).ok())
    }
}

/// Error body returned by the backend (`{"detail": ...}` or `{"message": ...}`).
///
/// `detail` is usually a string, but request validation failures send a list
/// of objects, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    /// `detail` as display text: strings verbatim, anything else as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => non_empty(s),
            other => Some(other.to_string()),
        }
    }

    pub fn message_text(&self) -> Option<String> {
        self.message.as_deref().and_then(non_empty)
    }
}

impl SdkError {
    /// Normalize this error into a single displayable message.
    ///
    /// Priority: structured `detail` → structured `message` → the error's own
    /// message → [`UNKNOWN_ERROR_MESSAGE`].
    ///
    /// HTTP variants that carry a body print it as part of their own message,
    /// so a body that is not a structured payload still reaches the caller.
    pub fn display_message(&self) -> String {
        if let SdkError::Http(http) = self {
            if let Some(payload) = http.payload() {
                if let Some(detail) = payload.detail_text() {
                    return detail;
                }
                if let Some(message) = payload.message_text() {
                    return message;
                }
            }
        }

        non_empty(&self.to_string()).unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
    }
}

/// A failed mutating action (create/update/delete, trading control).
///
/// `message` is the normalized text that was also recorded in the owning
/// state container; `source` keeps the underlying error for callers that
/// need the status code or body.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
    #[source]
    pub source: SdkError,
}

impl From<SdkError> for ActionError {
    fn from(source: SdkError) -> Self {
        Self {
            message: source.display_message(),
            source,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
