//! Transport error types.
//!
//! This module defines the errors a transport can report while exchanging a
//! rendered request for a response.

use thiserror::Error;

/// Errors that can occur while sending a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out before completion.
    #[error("Request timed out")]
    Timeout,

    /// The rendered URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be constructed from the rendered parts.
    #[error("Request build error: {0}")]
    Build(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        TransportError::InvalidUrl(err.to_string())
    }
}
