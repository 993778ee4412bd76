//! Base-level variables: the protocol-shaped output of a renderer.

use super::error::RenderError;
use serde::{Deserialize, Serialize};

/// One rendered request component.
///
/// The set of variants is closed; the request builder folds each of them with
/// an exhaustive match. Renderers that work with string tags go through
/// [`BaseVariable::from_tag`], which is where unknown tags are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BaseVariable {
    /// Appended to the query string as `name=value&`.
    UrlParam { name: String, value: String },

    /// Set as a request header.
    Header { name: String, value: String },

    /// Substituted for every `{name}` placeholder in the URL.
    UrlReplacement { name: String, value: String },

    /// Becomes the request body; `mimetype` becomes its Content-Type.
    Data {
        value: String,
        mimetype: Option<String>,
    },
}

impl BaseVariable {
    pub const URL_PARAM: &'static str = "url_param";
    pub const HEADER: &'static str = "header";
    pub const URL_REPLACEMENT: &'static str = "url_replacement";
    pub const DATA: &'static str = "data";

    /// Builds a base variable from its string tag.
    ///
    /// `name` is ignored for `data`, `mimetype` for every other tag.
    pub fn from_tag(
        tag: &str,
        name: impl Into<String>,
        value: impl Into<String>,
        mimetype: Option<&str>,
    ) -> Result<Self, RenderError> {
        let (name, value) = (name.into(), value.into());
        match tag {
            Self::URL_PARAM => Ok(BaseVariable::UrlParam { name, value }),
            Self::HEADER => Ok(BaseVariable::Header { name, value }),
            Self::URL_REPLACEMENT => Ok(BaseVariable::UrlReplacement { name, value }),
            Self::DATA => Ok(BaseVariable::Data {
                value,
                mimetype: mimetype.map(str::to_string),
            }),
            other => Err(RenderError::UnsupportedVariableType(other.to_string())),
        }
    }

    /// The string tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            BaseVariable::UrlParam { .. } => Self::URL_PARAM,
            BaseVariable::Header { .. } => Self::HEADER,
            BaseVariable::UrlReplacement { .. } => Self::URL_REPLACEMENT,
            BaseVariable::Data { .. } => Self::DATA,
        }
    }
}
