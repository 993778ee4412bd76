//! Semantic-to-base variable renderers.
//!
//! A [`Renderer`] turns every variable of one semantic type into zero or more
//! [`BaseVariable`]s. The request builder only depends on the trait;
//! [`StandardRenderer`] implements the variable types hive descriptions use.

use super::base::BaseVariable;
use super::error::RenderError;
use crate::variables::{Variable, VariableCollection};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Mimetype given to a `data` variable that does not declare one.
pub const DEFAULT_DATA_MIMETYPE: &str = "application/octet-stream";

/// Maps a semantic variable type and its variables to base-level variables.
///
/// Implementations must be deterministic for identical inputs.
pub trait Renderer {
    fn render(
        &self,
        var_type: &str,
        variables: &VariableCollection,
    ) -> Result<Vec<BaseVariable>, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&str, &VariableCollection) -> Result<Vec<BaseVariable>, RenderError>,
{
    fn render(
        &self,
        var_type: &str,
        variables: &VariableCollection,
    ) -> Result<Vec<BaseVariable>, RenderError> {
        self(var_type, variables)
    }
}

/// Renderer for the built-in variable types.
///
/// | type              | output                                                   |
/// |-------------------|----------------------------------------------------------|
/// | `url_param`       | one form-encoded query parameter per variable           |
/// | `header`          | one header per variable                                  |
/// | `url_replacement` | one `{name}` substitution per variable                   |
/// | `data`            | the raw value as body, with the variable's mimetype     |
/// | `json_data`       | a JSON body (single value, or an object keyed by name)  |
/// | `http_form`       | an `application/x-www-form-urlencoded` body              |
/// | `cookie`          | a single `Cookie` header                                 |
///
/// Variables without a value are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRenderer;

impl Renderer for StandardRenderer {
    fn render(
        &self,
        var_type: &str,
        variables: &VariableCollection,
    ) -> Result<Vec<BaseVariable>, RenderError> {
        let filled: Vec<(&Variable, String)> = variables
            .variables()
            .filter_map(|v| v.value_string().map(|s| (v, s)))
            .collect();

        let rendered: Vec<BaseVariable> = match var_type {
            "url_param" => filled
                .into_iter()
                .map(|(v, value)| BaseVariable::UrlParam {
                    name: form_encode(v.name()),
                    value: form_encode(&value),
                })
                .collect(),
            "header" => filled
                .into_iter()
                .map(|(v, value)| BaseVariable::Header {
                    name: v.name().to_string(),
                    value,
                })
                .collect(),
            "url_replacement" => filled
                .into_iter()
                .map(|(v, value)| BaseVariable::UrlReplacement {
                    name: v.name().to_string(),
                    value,
                })
                .collect(),
            "data" => filled
                .into_iter()
                .map(|(v, value)| BaseVariable::Data {
                    value,
                    mimetype: Some(v.mimetype().unwrap_or(DEFAULT_DATA_MIMETYPE).to_string()),
                })
                .collect(),
            "json_data" => render_json(variables)?.into_iter().collect(),
            "http_form" => render_form(&filled).into_iter().collect(),
            "cookie" => render_cookie(&filled).into_iter().collect(),
            other => return Err(RenderError::UnsupportedVariableType(other.to_string())),
        };

        Ok(rendered)
    }
}

fn form_encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

fn render_json(variables: &VariableCollection) -> Result<Option<BaseVariable>, RenderError> {
    let filled: Vec<&Variable> = variables.variables().filter(|v| v.has_value()).collect();

    let body = match filled.as_slice() {
        [] => return Ok(None),
        [single] => serde_json::to_string(single.value().unwrap_or(&Value::Null))?,
        many => {
            let object: Map<String, Value> = many
                .iter()
                .filter_map(|v| v.value().map(|value| (v.name().to_string(), value.clone())))
                .collect();
            serde_json::to_string(&object)?
        }
    };

    Ok(Some(BaseVariable::Data {
        value: body,
        mimetype: Some("application/json".to_string()),
    }))
}

fn render_form(filled: &[(&Variable, String)]) -> Option<BaseVariable> {
    if filled.is_empty() {
        return None;
    }
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filled.iter().map(|(v, value)| (v.name(), value.as_str())))
        .finish();

    Some(BaseVariable::Data {
        value: body,
        mimetype: Some("application/x-www-form-urlencoded".to_string()),
    })
}

fn render_cookie(filled: &[(&Variable, String)]) -> Option<BaseVariable> {
    if filled.is_empty() {
        return None;
    }
    let value = filled
        .iter()
        .map(|(v, value)| format!("{}={}", v.name(), value))
        .collect::<Vec<_>>()
        .join("; ");

    Some(BaseVariable::Header {
        name: "Cookie".to_string(),
        value,
    })
}
