//! Communicating with the remote API.
//!
//! A [`Request`] renders an action's filled variables as soon as it is built
//! and can then be sent through any [`Transport`]. The [`Response`] it
//! produces negotiates mimetype and encoding against the action's declared
//! return format before handing the body to a [`Decoder`].
//!
//! [`Client`] bundles a transport, renderer and decoder for the common case of
//! "fill these arguments, call the action, give me the value".

use crate::action::{Action, Direction};
use crate::config::get_config;
use crate::error::Result;
use crate::models::request::RenderedRequest;
use crate::models::response::ResponseEnvelope;
use crate::render::{Renderer, RequestBuilder, StandardRenderer};
use crate::response::{decode_text, Decoder, ResponseReader, StandardDecoder};
use crate::transport::Transport;
use crate::variables::{VariableCollection, VariableError};
use log::{debug, info};
use serde_json::Value;
use std::ops::Deref;

/// A rendered request for one action call.
pub struct Request<'a> {
    action: &'a dyn Action,
    variables: VariableCollection,
    output: RenderedRequest,
    verbose: bool,
}

impl<'a> Request<'a> {
    /// Renders `variables` for `action`.
    ///
    /// Rendering happens here, so an unsupported variable type fails before
    /// anything is sent.
    pub fn new(
        action: &'a dyn Action,
        variables: VariableCollection,
        renderer: &dyn Renderer,
        verbose: bool,
    ) -> Result<Self> {
        let output = RequestBuilder::new(action.endpoint_url())
            .with_method(action.method())
            .render(&variables, renderer)?;

        Ok(Self {
            action,
            variables,
            output,
            verbose,
        })
    }

    /// The rendered URL, headers and body.
    pub fn output(&self) -> &RenderedRequest {
        &self.output
    }

    pub fn variables(&self) -> &VariableCollection {
        &self.variables
    }

    /// Human-readable dump of the rendered request.
    pub fn describe(&self) -> String {
        self.output.describe()
    }

    /// Sends the request and returns the undecoded response.
    ///
    /// Verbose requests are logged at info level before sending.
    pub fn send(&self, transport: &dyn Transport) -> Result<Response> {
        if self.verbose {
            info!("{}\n{}", self.action.name(), self.describe());
        }
        let envelope = transport.send(&self.output)?;
        debug!("{} returned {}", self.action.name(), envelope.code);
        Ok(Response::new(self.action, envelope))
    }

    /// Sends the request and decodes the response body.
    pub fn send_and_read(&self, transport: &dyn Transport, decoder: &dyn Decoder) -> Result<Value> {
        self.send(transport)?.read(decoder)
    }
}

/// A response read on behalf of the action that produced it.
///
/// Dereferences to [`ResponseReader`] for `mimetype`, `encoding`, `cookies`
/// and the raw parts.
#[derive(Debug, Clone)]
pub struct Response {
    reader: ResponseReader,
}

impl Response {
    pub fn new(action: &dyn Action, envelope: ResponseEnvelope) -> Self {
        Self {
            reader: ResponseReader::new(envelope, action.format(Direction::Returns)),
        }
    }

    /// Decodes the body with the negotiated mimetype and encoding.
    pub fn read(&self, decoder: &dyn Decoder) -> Result<Value> {
        Ok(self.reader.read(decoder)?)
    }
}

impl Deref for Response {
    type Target = ResponseReader;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

/// Fetches `url` with a plain GET and decodes the body as UTF-8 JSON.
pub fn download_as_json(transport: &dyn Transport, url: &str) -> Result<Value> {
    let envelope = transport.send(&RenderedRequest::new(url))?;
    let text = decode_text(&envelope.data, "utf-8")?;
    Ok(serde_json::from_str(&text).map_err(crate::response::DecodeError::from)?)
}

/// Fills a fresh copy of `action`'s variables for one call.
///
/// Arguments are only applied when some were supplied, so an action whose
/// variables are all optional or preset can be called bare. Fails with
/// [`VariableError::MissingVariables`] when required variables remain unfilled.
pub(crate) fn fill_variables<I, S>(
    action: &dyn Action,
    arg: Option<Value>,
    kwargs: I,
) -> Result<VariableCollection>
where
    I: IntoIterator<Item = (S, Value)>,
    S: AsRef<str>,
{
    let mut variables = action.variables();
    let kwargs: Vec<(S, Value)> = kwargs.into_iter().collect();
    if arg.is_some() || !kwargs.is_empty() {
        variables.fill(arg, kwargs)?;
    }

    let missing = variables.missing_vars();
    if !missing.is_empty() {
        return Err(VariableError::MissingVariables(missing).into());
    }
    Ok(variables)
}

/// Calls actions end to end.
pub struct Client {
    transport: Box<dyn Transport>,
    renderer: Box<dyn Renderer>,
    decoder: Box<dyn Decoder>,
    verbose: bool,
}

impl Client {
    /// Creates a client with the standard renderer and decoder.
    ///
    /// Verbosity is taken from the global configuration.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            renderer: Box::new(StandardRenderer),
            decoder: Box::new(StandardDecoder),
            verbose: get_config().verbose,
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fills the action's variables and renders a request without sending it.
    ///
    /// Fails with [`VariableError::MissingVariables`] when required variables
    /// remain unfilled.
    pub fn prepare<'a, I, S>(
        &self,
        action: &'a dyn Action,
        arg: Option<Value>,
        kwargs: I,
    ) -> Result<Request<'a>>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let variables = fill_variables(action, arg, kwargs)?;
        Request::new(action, variables, self.renderer.as_ref(), self.verbose)
    }

    /// Fills, renders, sends and decodes in one go.
    pub fn call<I, S>(&self, action: &dyn Action, arg: Option<Value>, kwargs: I) -> Result<Value>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        self.prepare(action, arg, kwargs)?
            .send_and_read(self.transport.as_ref(), self.decoder.as_ref())
    }

    /// Sends a rendered request and returns the undecoded response.
    pub fn send(&self, request: &Request<'_>) -> Result<Response> {
        request.send(self.transport.as_ref())
    }

    /// See [`download_as_json`].
    pub fn download_as_json(&self, url: &str) -> Result<Value> {
        download_as_json(self.transport.as_ref(), url)
    }
}
