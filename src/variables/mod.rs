//! Variable model for actions.
//!
//! This module provides the semantic input variables of an action, their
//! merge rules, and the ordered collection that fills and indexes them.

pub mod collection;
pub mod error;
pub mod variable;

pub use collection::{escape_name, unescape_name, VariableCollection, RESERVED_NAMES};
pub use error::VariableError;
pub use variable::{merge, Variable, VariableSpec, DEFAULT_VARIABLE_TYPE};
