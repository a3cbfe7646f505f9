//! Feed client error types.

use std::time::Duration;

/// Errors from fetching or decoding an upstream feed.
///
/// None of these reach the caller of the aggregator: a failed feed only
/// means its mode contributes no vehicles.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, client timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// The fetch did not finish within its deadline
    #[error("timed out after {after:?}")]
    Timeout { after: Duration },

    /// The caller cancelled the request
    #[error("cancelled")]
    Cancelled,

    /// A fixture file could not be read
    #[error("fixture {path}: {message}")]
    Fixture { path: String, message: String },
}

impl FeedError {
    /// Build a decode error, keeping the start of the body for diagnostics.
    pub(crate) fn decode(err: impl std::fmt::Display, body: &str) -> Self {
        FeedError::Decode {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    /// The start of the response body, for errors that kept one.
    pub fn body(&self) -> Option<&str> {
        match self {
            FeedError::Decode { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
