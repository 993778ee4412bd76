//! Errors raised while filling a variable collection.

use thiserror::Error;

/// Errors that can occur when supplying values to a [`VariableCollection`].
///
/// [`VariableCollection`]: super::VariableCollection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// A keyword fill named a variable the collection does not define.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// A positional fill did not find exactly one unfilled default-typed slot.
    #[error("Cannot fill positional argument: expected exactly one unfilled default-typed variable, found {}", candidates.len())]
    AmbiguousFill {
        /// Names of the slots that qualified, in insertion order.
        candidates: Vec<String>,
    },

    /// `fill` was called with neither a positional nor a keyword value.
    #[error("No arguments supplied to fill")]
    NoArguments,

    /// Required variables were still unfilled when the request was built.
    #[error("Missing required variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
}
