//! Crate-level error type.
//!
//! Each stage of the pipeline has its own error enum; [`Error`] wraps them so
//! a whole call can be driven with `?`. Errors from collaborators are carried
//! through unchanged.

use crate::render::RenderError;
use crate::response::DecodeError;
use crate::transport::TransportError;
use crate::variables::VariableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Variable(#[from] VariableError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
