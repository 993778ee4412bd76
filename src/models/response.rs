//! Raw HTTP response model.
//!
//! A [`ResponseEnvelope`] is what a transport hands back: status code, headers
//! and undecoded body bytes. It is consumed by the
//! [`ResponseReader`](crate::response::ResponseReader).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw transport result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Response headers as received. Lookups through [`header`](Self::header)
    /// ignore case.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    ///
    /// Kept as bytes so that the charset can be applied during decoding.
    pub data: Vec<u8>,

    /// HTTP status code (e.g., 200, 404, 500).
    pub code: u16,
}

impl ResponseEnvelope {
    /// Creates an envelope with the given status code, no headers and an empty body.
    pub fn new(code: u16) -> Self {
        Self {
            headers: HashMap::new(),
            data: Vec::new(),
            code,
        }
    }

    /// Builder-style header insertion.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builder-style body assignment.
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Gets a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Checks if the response status indicates a redirection (3xx).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_checks() {
        assert!(ResponseEnvelope::new(200).is_success());
        assert!(ResponseEnvelope::new(301).is_redirect());
        assert!(ResponseEnvelope::new(404).is_client_error());
        assert!(ResponseEnvelope::new(503).is_server_error());
        assert!(!ResponseEnvelope::new(500).is_success());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let envelope = ResponseEnvelope::new(200).with_header("content-type", "text/html");
        assert_eq!(envelope.header("Content-Type"), Some("text/html"));
        assert_eq!(envelope.header("Set-Cookie"), None);
    }
}
