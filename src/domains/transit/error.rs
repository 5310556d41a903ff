//! Upstream client error types.

use thiserror::Error;

/// Errors from the transit API client.
///
/// Every failure the client can hit ends up here with a readable message.
#[derive(Debug, Error)]
pub enum TransitError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// The upstream answered with a non-success status.
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: u16,
        message: Option<String>,
    },

    /// A success status whose body reports `{error: true, msg}`.
    #[error("{0}")]
    Upstream(String),

    /// The body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The query parameters could not be encoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A path segment would be resolved away instead of sent.
    #[error("invalid path segment '{0}'")]
    InvalidPathSegment(String),

    /// The configured base URL cannot take endpoint paths.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

fn transport_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(msg) => format!("HTTP {status}: {msg}"),
        None => format!("HTTP {status}"),
    }
}

impl TransitError {
    /// HTTP status for transport errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
