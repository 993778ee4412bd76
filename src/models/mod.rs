//! Data models for rendered requests and raw responses.
//!
//! These are the shapes that cross the transport boundary.

pub mod request;
pub mod response;

pub use request::{HttpMethod, RenderedRequest};
pub use response::ResponseEnvelope;
