//! Beekeeper: declarative API actions over HTTP.
//!
//! An action is a named remote operation with a set of typed input variables.
//! This crate fills those variables from caller arguments, renders them into a
//! concrete HTTP request, sends it, and decodes the response into a
//! [`serde_json::Value`].
//!
//! # Architecture
//!
//! - **variables**: the variable model, its merge rules and the ordered collection
//! - **render**: renderers and the fold that builds URL, headers and body
//! - **models**: rendered requests and raw responses
//! - **transport**: the blocking transport trait and a reqwest implementation
//! - **response**: mimetype/charset negotiation and body decoders
//! - **action**: the action trait and an in-memory definition
//! - **comms**: the per-call request/response objects and the [`Client`]
//! - **config**: global client settings
//!
//! # Pipeline
//!
//! 1. [`VariableCollection::fill`] assigns positional and keyword arguments
//! 2. [`RequestBuilder::render`] asks a [`Renderer`] for base-level variables
//!    per declared type and folds them into a [`RenderedRequest`]
//! 3. [`Transport::send`] performs the exchange
//! 4. [`ResponseReader::read`] picks mimetype and encoding and calls a [`Decoder`]
//!
//! # Usage
//!
//! ```no_run
//! use beekeeper::{Client, HttpTransport, StaticAction, VariableSpec};
//! use serde_json::json;
//!
//! # fn example() -> beekeeper::Result<()> {
//! let action = StaticAction::new("get_user", "https://api.example.com/users/{id}")
//!     .variable("id", VariableSpec::new().of_type("url_replacement"))
//!     .variable("fields", VariableSpec::new().optional(true));
//!
//! let client = Client::new(HttpTransport::from_global_config()?);
//! let user = client.call(&action, None, [("id", json!("42"))])?;
//! println!("{}", user);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod comms;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod response;
pub mod transport;
pub mod variables;

pub use action::{Action, Direction, StaticAction};
pub use comms::{download_as_json, Client, Request, Response};
pub use error::{Error, Result};
pub use models::{HttpMethod, RenderedRequest, ResponseEnvelope};
pub use render::{BaseVariable, RenderError, Renderer, RequestBuilder, StandardRenderer};
pub use response::{DecodeError, Decoder, ResponseReader, StandardDecoder};
pub use transport::{Transport, TransportConfig, TransportError};
pub use variables::{
    merge, Variable, VariableCollection, VariableError, VariableSpec, DEFAULT_VARIABLE_TYPE,
};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
