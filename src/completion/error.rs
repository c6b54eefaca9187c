use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const MAX_BODY_PREVIEW: usize = 300;

/// Why a single completion call produced no reply.
///
/// Every variant is recoverable: the session reports it and accepts the next
/// turn. Nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No API key was configured. Detected before any network traffic.
    #[error("No API key configured")]
    AuthMissing,

    /// The endpoint answered with a non-success status.
    #[error("API request failed with status {status}: {}", summarize_body(.body))]
    Http { status: u16, body: String },

    /// No response arrived within the client timeout.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The connection failed before a response was received.
    #[error("Network error: {0}")]
    Transport(String),

    /// A success status whose body carries no reply.
    #[error("Invalid response from API: {0}")]
    Malformed(String),
}

impl CompletionError {
    /// Returns a short suggestion for statuses users can act on.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::AuthMissing | Self::Http { status: 401, .. } => {
                Some("Check that your API key is set and valid.")
            }
            Self::Http { status: 404, .. } => {
                Some("The model was not found. Check the model ID with /swmodel.")
            }
            Self::Http { status: 429, .. } => {
                Some("Rate limit exceeded. Wait a moment, then send your message again.")
            }
            Self::Timeout(_) => Some("The model took too long to answer. Try sending again."),
            _ => None,
        }
    }

    /// HTTP status of an [`CompletionError::Http`] failure.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Prefers the `error.message` of an OpenAI-style error body, otherwise a
/// bounded preview of the raw body.
fn summarize_body(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        return "(empty body)".to_string();
    }
    if body.chars().count() <= MAX_BODY_PREVIEW {
        return body.to_string();
    }
    let preview: String = body.chars().take(MAX_BODY_PREVIEW).collect();
    format!("{preview}...")
}
