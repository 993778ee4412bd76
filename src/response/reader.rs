//! Response content negotiation.
//!
//! The [`ResponseReader`] works out how a body should be decoded: the
//! mimetype comes from the `Content-Type` header, falling back to the format
//! the action declares; the encoding comes from its `charset=` parameter,
//! falling back to UTF-8.

use super::decoder::Decoder;
use super::error::DecodeError;
use crate::models::response::ResponseEnvelope;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

/// Encoding assumed when the response does not name a charset.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Reads one response on behalf of an action.
#[derive(Debug, Clone)]
pub struct ResponseReader {
    envelope: ResponseEnvelope,
    declared_format: String,
}

impl ResponseReader {
    /// Wraps a transport result. `declared_format` is the action's return
    /// format, used only when the response carries no `Content-Type`.
    pub fn new(envelope: ResponseEnvelope, declared_format: impl Into<String>) -> Self {
        Self {
            envelope,
            declared_format: declared_format.into(),
        }
    }

    fn content_type(&self) -> Option<&str> {
        self.envelope.header("Content-Type")
    }

    /// The response mimetype, without parameters.
    pub fn mimetype(&self) -> String {
        match self.content_type() {
            Some(header) => header.split(';').next().unwrap_or(header).to_string(),
            None => self.declared_format.clone(),
        }
    }

    /// The charset named in `Content-Type`, or [`DEFAULT_ENCODING`].
    pub fn encoding(&self) -> String {
        self.content_type()
            .and_then(|header| header.split_once("charset="))
            .map(|(_, rest)| rest.split(';').next().unwrap_or(rest).to_string())
            .unwrap_or_else(|| DEFAULT_ENCODING.to_string())
    }

    /// The `Set-Cookie` header split on `"; "`.
    ///
    /// Only a single `Set-Cookie` header is considered, and commas inside
    /// cookie values are not handled.
    pub fn cookies(&self) -> Vec<String> {
        match self.envelope.header("Set-Cookie") {
            Some(header) if !header.is_empty() => {
                header.split("; ").map(str::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Decodes the body with the negotiated mimetype and encoding.
    ///
    /// # Arguments
    ///
    /// * `decoder` - Receives the raw body, [`mimetype`](Self::mimetype) and
    ///   [`encoding`](Self::encoding)
    ///
    /// # Returns
    ///
    /// Whatever the decoder produces, or its [`DecodeError`].
    pub fn read(&self, decoder: &dyn Decoder) -> Result<Value, DecodeError> {
        let (mimetype, encoding) = (self.mimetype(), self.encoding());
        debug!(
            "decoding {} byte(s) as {} ({})",
            self.envelope.data.len(),
            mimetype,
            encoding
        );
        decoder.decode(&self.envelope.data, &mimetype, &encoding)
    }

    /// The action's declared return format.
    pub fn format(&self) -> &str {
        &self.declared_format
    }

    pub fn code(&self) -> u16 {
        self.envelope.code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.envelope.headers
    }

    pub fn data(&self) -> &[u8] {
        &self.envelope.data
    }

    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        self.envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::StandardDecoder;
    use serde_json::json;

    fn reader(headers: &[(&str, &str)], format: &str) -> ResponseReader {
        let envelope = headers
            .iter()
            .fold(ResponseEnvelope::new(200), |env, (k, v)| env.with_header(*k, *v));
        ResponseReader::new(envelope, format)
    }

    #[test]
    fn test_mimetype_and_charset_from_header() {
        let r = reader(
            &[("Content-Type", "application/json; charset=ISO-8859-1")],
            "text/plain",
        );
        assert_eq!(r.mimetype(), "application/json");
        assert_eq!(r.encoding(), "ISO-8859-1");
    }

    #[test]
    fn test_charset_followed_by_parameter() {
        let r = reader(&[("Content-Type", "text/html;charset=utf-16;q=1")], "text/plain");
        assert_eq!(r.mimetype(), "text/html");
        assert_eq!(r.encoding(), "utf-16");
    }

    #[test]
    fn test_mimetype_without_parameters() {
        let r = reader(&[("content-type", "application/xml")], "text/plain");
        assert_eq!(r.mimetype(), "application/xml");
        assert_eq!(r.encoding(), "utf-8");
    }

    #[test]
    fn test_falls_back_to_declared_format() {
        let r = reader(&[], "text/plain");
        assert_eq!(r.mimetype(), "text/plain");
        assert_eq!(r.encoding(), "utf-8");
        assert_eq!(r.format(), "text/plain");
    }

    #[test]
    fn test_cookies() {
        let r = reader(&[("Set-Cookie", "a=1; b=2")], "text/plain");
        assert_eq!(r.cookies(), vec!["a=1".to_string(), "b=2".to_string()]);

        assert!(reader(&[], "text/plain").cookies().is_empty());
        assert!(reader(&[("Set-Cookie", "")], "text/plain").cookies().is_empty());
    }

    #[test]
    fn test_read_dispatches_negotiated_values() {
        let envelope = ResponseEnvelope::new(200)
            .with_header("Content-Type", "text/csv; charset=latin-1")
            .with_data(vec![0x61, 0xE9]);
        let r = ResponseReader::new(envelope, "application/json");

        let decoder = |data: &[u8], mimetype: &str, encoding: &str| -> Result<Value, DecodeError> {
            Ok(json!({"len": data.len(), "mimetype": mimetype, "encoding": encoding}))
        };
        assert_eq!(
            r.read(&decoder).unwrap(),
            json!({"len": 2, "mimetype": "text/csv", "encoding": "latin-1"})
        );
        assert_eq!(r.read(&StandardDecoder).unwrap(), json!("aé"));
    }
}
