//! Response body decoders.
//!
//! A [`Decoder`] maps raw bytes plus the negotiated mimetype and encoding to a
//! [`serde_json::Value`]. [`StandardDecoder`] covers the formats APIs commonly
//! return; anything else is reported as [`DecodeError::UnsupportedMimetype`].

use super::error::DecodeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Decodes a response body.
pub trait Decoder {
    fn decode(&self, data: &[u8], mimetype: &str, encoding: &str) -> Result<Value, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&[u8], &str, &str) -> Result<Value, DecodeError>,
{
    fn decode(&self, data: &[u8], mimetype: &str, encoding: &str) -> Result<Value, DecodeError> {
        self(data, mimetype, encoding)
    }
}

/// Decoder for JSON, text, XML, form and binary bodies.
///
/// - `application/json` and `*+json`: parsed JSON (an empty body is `null`)
/// - `text/*`, `application/xml`: the decoded text as a string
/// - `application/x-www-form-urlencoded`: an object of the decoded pairs
/// - `application/octet-stream`: the body as a base64 string
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl Decoder for StandardDecoder {
    fn decode(&self, data: &[u8], mimetype: &str, encoding: &str) -> Result<Value, DecodeError> {
        let mimetype = mimetype.trim().to_ascii_lowercase();

        if mimetype == "application/json" || mimetype.ends_with("+json") {
            let text = decode_text(data, encoding)?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        if mimetype.starts_with("text/") || mimetype == "application/xml" || mimetype.ends_with("+xml") {
            return Ok(Value::String(decode_text(data, encoding)?));
        }

        match mimetype.as_str() {
            "application/x-www-form-urlencoded" => {
                let text = decode_text(data, encoding)?;
                let pairs: Map<String, Value> = form_urlencoded::parse(text.as_bytes())
                    .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                    .collect();
                Ok(Value::Object(pairs))
            }
            "application/octet-stream" => Ok(Value::String(STANDARD.encode(data))),
            _ => Err(DecodeError::UnsupportedMimetype(mimetype)),
        }
    }
}

/// Decodes bytes as text in the named charset.
///
/// Supports UTF-8, US-ASCII and ISO-8859-1, matched case-insensitively.
pub fn decode_text(data: &[u8], encoding: &str) -> Result<String, DecodeError> {
    let invalid = || DecodeError::InvalidText {
        encoding: encoding.to_string(),
    };

    match encoding.trim().to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => String::from_utf8(data.to_vec()).map_err(|_| invalid()),
        "us-ascii" | "ascii" => {
            if data.is_ascii() {
                Ok(data.iter().map(|&b| b as char).collect())
            } else {
                Err(invalid())
            }
        }
        "iso-8859-1" | "latin-1" | "latin1" => Ok(data.iter().map(|&b| b as char).collect()),
        _ => Err(DecodeError::UnsupportedEncoding(encoding.to_string())),
    }
}
