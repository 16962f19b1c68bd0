//! Error types for the webhook client.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when delivering to a webhook.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Missing or malformed endpoint
    #[error("Configuration error: {0}")]
    Config(String),

    /// Capture to deliver does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading the capture
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Embed payload could not be encoded
    #[error("Failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Endpoint answered 429
    #[error("Rate limited (HTTP 429): {body}")]
    RateLimited {
        retry_after: Option<Duration>,
        body: String,
    },

    /// Endpoint answered with any other non-success status
    #[error("Webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl WebhookError {
    /// HTTP status of the response that caused this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WebhookError::RateLimited { .. } => Some(429),
            WebhookError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, WebhookError::RateLimited { .. })
    }

    /// Server-suggested wait before the next request.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            WebhookError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Result type for webhook operations.
pub type Result<T> = std::result::Result<T, WebhookError>;
