//! Request transports.
//!
//! A [`Transport`] performs one blocking request/response exchange for a
//! [`RenderedRequest`]. Timeouts and redirect handling are the transport's
//! business; the rest of the pipeline never retries.

pub mod config;
pub mod error;

#[cfg(feature = "http")]
pub mod http;

pub use config::TransportConfig;
pub use error::TransportError;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use crate::models::request::RenderedRequest;
use crate::models::response::ResponseEnvelope;

/// Exchanges a rendered request for a raw response.
pub trait Transport {
    fn send(&self, request: &RenderedRequest) -> Result<ResponseEnvelope, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&RenderedRequest) -> Result<ResponseEnvelope, TransportError>,
{
    fn send(&self, request: &RenderedRequest) -> Result<ResponseEnvelope, TransportError> {
        self(request)
    }
}
