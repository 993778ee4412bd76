//! Errors raised while rendering variables into a request.

use thiserror::Error;

/// Errors that can occur while turning semantic variables into base-level ones.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A variable type no renderer or fold step knows how to handle.
    ///
    /// This is a configuration error in the action definition and is never
    /// silently skipped.
    #[error("Cannot handle variables of type {0}")]
    UnsupportedVariableType(String),

    /// A variable value could not be serialized into a request body.
    #[error("Failed to serialize variable value: {0}")]
    Serialization(#[from] serde_json::Error),
}
