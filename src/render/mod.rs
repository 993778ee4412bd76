//! Request rendering.
//!
//! Semantic variables are rendered into [`BaseVariable`]s by a [`Renderer`],
//! then folded into a [`RenderedRequest`](crate::models::RenderedRequest) by
//! the [`RequestBuilder`].

pub mod base;
pub mod builder;
pub mod error;
pub mod renderer;

pub use base::BaseVariable;
pub use builder::{fold, RequestBuilder};
pub use error::RenderError;
pub use renderer::{Renderer, StandardRenderer, DEFAULT_DATA_MIMETYPE};
