//! Rendered HTTP request model.
//!
//! This module defines the three base-level request components produced by
//! rendering an action's variables (URL, headers and body) together with the
//! HTTP method used to send them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a method name, ignoring case.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a known method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully rendered request, ready for a transport.
///
/// Built by folding base-level variables into a fresh value; see
/// [`RequestBuilder`](crate::render::RequestBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRequest {
    /// HTTP method. Defaults to `GET` until the builder resolves it.
    pub method: HttpMethod,

    /// Target URL, including the accumulated query string.
    ///
    /// Always contains the `?` separator appended to the endpoint URL, and a
    /// trailing `&` after each query parameter.
    pub url: String,

    /// Request headers. Later writes to the same name replace earlier ones.
    pub headers: HashMap<String, String>,

    /// Optional request body.
    pub data: Option<String>,
}

impl RenderedRequest {
    /// Creates an empty request for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::GET,
            url: url.into(),
            headers: HashMap::new(),
            data: None,
        }
    }

    /// Sets a header, dropping any existing header with the same name in a
    /// different case.
    pub fn set_header(&mut self, name: String, value: String) {
        self.headers
            .retain(|k, _| k == &name || !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    /// Removes a header regardless of case.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    }

    /// Gets a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.data.as_ref().map_or(false, |b| !b.is_empty())
    }

    /// Method implied by the request contents: `POST` with a non-empty body,
    /// `GET` otherwise.
    pub fn inferred_method(&self) -> HttpMethod {
        if self.has_body() {
            HttpMethod::POST
        } else {
            HttpMethod::GET
        }
    }

    /// Human-readable dump of the request: URL, headers (or `None`) and data.
    pub fn describe(&self) -> String {
        let mut out = format!("URL: {}\nHeaders:\n", self.url);
        if self.headers.is_empty() {
            out.push_str("None\n");
        } else {
            let mut names: Vec<&String> = self.headers.keys().collect();
            names.sort();
            for name in names {
                out.push_str(&format!("{}: {}\n", name, self.headers[name]));
            }
        }
        out.push_str(&format!(
            "Data:\n{}",
            self.data.as_deref().unwrap_or("None")
        ));
        out
    }
}
