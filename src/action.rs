//! API actions.
//!
//! An [`Action`] is one operation of a remote API: where it lives, which
//! variables it takes, and what format it returns. Loading actions from a
//! hive description is left to the caller; [`StaticAction`] is a plain
//! in-memory definition.

use crate::comms::{fill_variables, Request};
use crate::config::get_config;
use crate::error::Result;
use crate::models::request::HttpMethod;
use crate::render::Renderer;
use crate::response::Decoder;
use crate::transport::Transport;
use crate::variables::{VariableCollection, VariableSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_FORMAT: &str = "application/json";

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Which side of an exchange a format describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The format of request bodies the action accepts.
    Accepts,
    /// The format of response bodies the action returns.
    Returns,
}

/// An operation that can be rendered into a request.
pub trait Action {
    /// Name of the action, for logging.
    fn name(&self) -> &str;

    /// Endpoint URL without a query string. May contain `{name}` placeholders.
    fn endpoint_url(&self) -> String;

    /// Declared format for `direction`. The `Returns` format is used when a
    /// response carries no `Content-Type`.
    fn format(&self, direction: Direction) -> String;

    /// Declared HTTP method, if any.
    fn method(&self) -> Option<HttpMethod> {
        None
    }

    /// A fresh copy of the action's variable definitions.
    fn variables(&self) -> VariableCollection;
}

/// In-memory action definition.
///
/// Can be built in code or deserialized from JSON, where `variables` is a map
/// of names to definitions in document order:
///
/// ```
/// use beekeeper::action::{Action, StaticAction};
///
/// let action: StaticAction = serde_json::from_str(r#"{
///     "name": "get_user",
///     "url": "https://api.example.com/users/{id}",
///     "variables": {"id": {"type": "url_replacement"}}
/// }"#).unwrap();
/// assert_eq!(action.variables().missing_vars(), vec!["id".to_string()]);
/// ```
///
/// ```
/// use beekeeper::action::{Action, Direction, StaticAction};
/// use beekeeper::variables::VariableSpec;
///
/// let action = StaticAction::new("get_user", "https://api.example.com/users/{id}")
///     .variable("id", VariableSpec::new().of_type("url_replacement"))
///     .returns("application/json");
///
/// assert_eq!(action.format(Direction::Returns), "application/json");
/// assert_eq!(action.variables().missing_vars(), vec!["id".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaticAction {
    name: String,
    url: String,
    #[serde(default)]
    method: Option<HttpMethod>,
    #[serde(default = "default_format")]
    accepts: String,
    #[serde(default = "default_format")]
    returns: String,
    #[serde(default)]
    variables: VariableCollection,
}

impl StaticAction {
    /// Creates an action with no variables that accepts and returns JSON.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: None,
            accepts: default_format(),
            returns: default_format(),
            variables: VariableCollection::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn accepts(mut self, mimetype: impl Into<String>) -> Self {
        self.accepts = mimetype.into();
        self
    }

    pub fn returns(mut self, mimetype: impl Into<String>) -> Self {
        self.returns = mimetype.into();
        self
    }

    /// Adds a variable definition, merging into any existing one of the same name.
    pub fn variable(mut self, name: &str, spec: VariableSpec) -> Self {
        self.variables.add(name, spec);
        self
    }

    /// Merges a set of shared definitions (for example API-wide variables)
    /// underneath this action's own ones.
    pub fn inherit(mut self, shared: &VariableCollection) -> Self {
        let mut merged = shared.clone();
        merged.extend_from(&self.variables);
        self.variables = merged;
        self
    }

    /// Fills, renders, sends and decodes one call of this action.
    ///
    /// # Arguments
    ///
    /// * `transport` - Performs the exchange
    /// * `renderer` - Turns variable types into request components
    /// * `decoder` - Decodes the response body
    /// * `arg` - Positional value for the single unnamed slot, if any
    /// * `kwargs` - `(name, value)` pairs
    ///
    /// # Returns
    ///
    /// The decoded response body. Fails with
    /// [`VariableError::MissingVariables`](crate::variables::VariableError::MissingVariables)
    /// before anything is sent when a required variable stays unfilled.
    pub fn execute<I, S>(
        &self,
        transport: &dyn Transport,
        renderer: &dyn Renderer,
        decoder: &dyn Decoder,
        arg: Option<Value>,
        kwargs: I,
    ) -> Result<Value>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let variables = fill_variables(self, arg, kwargs)?;
        Request::new(self, variables, renderer, get_config().verbose)?
            .send_and_read(transport, decoder)
    }
}

impl Action for StaticAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint_url(&self) -> String {
        self.url.clone()
    }

    fn format(&self, direction: Direction) -> String {
        match direction {
            Direction::Accepts => self.accepts.clone(),
            Direction::Returns => self.returns.clone(),
        }
    }

    fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    fn variables(&self) -> VariableCollection {
        self.variables.clone()
    }
}
