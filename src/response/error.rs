//! Errors raised while decoding a response body.

use thiserror::Error;

/// Errors that can occur when turning response bytes into a structured value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No decoder is registered for the negotiated mimetype.
    #[error("Cannot decode data of type {0}")]
    UnsupportedMimetype(String),

    /// The charset named by the response is not supported.
    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    /// The body is not valid text in the negotiated encoding.
    #[error("Response body is not valid {encoding} text")]
    InvalidText {
        /// The encoding the body was decoded with
        encoding: String,
    },

    /// The body is not valid JSON.
    #[error("Invalid JSON in response body: {0}")]
    Json(#[from] serde_json::Error),
}
