//! The single named input of an action.
//!
//! A [`Variable`] carries an optional value, the semantic types it renders as,
//! an optional body mimetype and an optionality flag. Variables are built from
//! partial [`VariableSpec`] definitions and combined with [`merge`], where the
//! later definition always overrides the earlier one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type assigned to a variable that declares none.
///
/// Variables of this type render as URL query parameters and are the only
/// candidates for positional filling.
pub const DEFAULT_VARIABLE_TYPE: &str = "url_param";

/// Partial variable definition, as found in an action or hive description.
///
/// Every field is optional so that a later definition can override only the
/// parts it cares about. `type` and `types` are interchangeable spellings; a
/// scalar `type` is treated as a one-element `types` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableSpec {
    pub value: Option<Value>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl VariableSpec {
    /// Creates an empty definition (default type, no value, required).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Declares a single type.
    pub fn of_type(mut self, var_type: impl Into<String>) -> Self {
        self.var_type = Some(var_type.into());
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }
}

/// A semantic input variable.
///
/// Fields are private: once built or merged a variable only changes through
/// the owning collection, which replaces it with a new value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    value: Option<Value>,
    /// Never empty once built through [`Variable::from_spec`].
    types: Vec<String>,
    mimetype: Option<String>,
    /// `None` when the definition never said, so a merge can tell
    /// "not declared" apart from an explicit `false`.
    optional: Option<bool>,
}

impl Variable {
    /// Builds a variable from a partial definition.
    ///
    /// When both `types` and `type` are given, `type` is appended to `types`
    /// unless already listed. A definition without any type gets
    /// [`DEFAULT_VARIABLE_TYPE`].
    pub fn from_spec(spec: VariableSpec) -> Self {
        let mut types = spec.types.unwrap_or_default();
        if let Some(var_type) = spec.var_type {
            if !types.contains(&var_type) {
                types.push(var_type);
            }
        }
        dedup_in_place(&mut types);
        if types.is_empty() {
            types.push(DEFAULT_VARIABLE_TYPE.to_string());
        }

        Self {
            name: String::new(),
            value: spec.value.filter(|v| !v.is_null()),
            types,
            mimetype: spec.mimetype,
            optional: spec.optional,
        }
    }

    /// External name of the variable. Empty until the variable joins a collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The value as request text: JSON strings verbatim, anything else as JSON.
    pub fn value_string(&self) -> Option<String> {
        self.value.as_ref().map(value_to_string)
    }

    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    /// Declared types, or the implicit default type when none were declared.
    ///
    /// Only a `Variable::default()` has no stored types; it still reports the
    /// default here.
    pub fn types(&self) -> Vec<&str> {
        if self.types.is_empty() {
            vec![DEFAULT_VARIABLE_TYPE]
        } else {
            self.types.iter().map(String::as_str).collect()
        }
    }

    pub fn has_type(&self, var_type: &str) -> bool {
        self.types().contains(&var_type)
    }

    /// True when the only type is the implicit default.
    pub fn is_default_typed(&self) -> bool {
        self.types() == [DEFAULT_VARIABLE_TYPE]
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_value_of_type(&self, var_type: &str) -> bool {
        self.has_value() && self.has_type(var_type)
    }

    /// A variable is satisfied when it has a value or may go without one.
    pub fn is_filled(&self) -> bool {
        self.has_value() || self.is_optional()
    }

    /// Returns a copy carrying the given external name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy carrying the given value. A JSON `null` clears the value.
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            value: Some(value).filter(|v| !v.is_null()),
            ..self.clone()
        }
    }
}

impl From<VariableSpec> for Variable {
    fn from(spec: VariableSpec) -> Self {
        Variable::from_spec(spec)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.types() == other.types()
            && self.mimetype == other.mimetype
            && self.is_optional() == other.is_optional()
    }
}

/// Merges two definitions of the same variable; `b` overrides `a`.
///
/// Scalar fields come from `b` when `b` declares them and from `a` otherwise.
/// The result's types are `b.types()` followed by those of `a.types()` that
/// `b` does not already list. A `b` declaring no type contributes the
/// implicit default.
pub fn merge(a: &Variable, b: &Variable) -> Variable {
    let mut types: Vec<String> = b.types().into_iter().map(str::to_string).collect();
    for var_type in a.types() {
        if !types.iter().any(|t| t == var_type) {
            types.push(var_type.to_string());
        }
    }

    Variable {
        name: if b.name.is_empty() {
            a.name.clone()
        } else {
            b.name.clone()
        },
        value: b.value.clone().or_else(|| a.value.clone()),
        types,
        mimetype: b.mimetype.clone().or_else(|| a.mimetype.clone()),
        optional: b.optional.or(a.optional),
    }
}

pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn dedup_in_place(types: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(types.len());
    types.retain(|t| {
        if seen.contains(t) {
            false
        } else {
            seen.push(t.clone());
            true
        }
    });
}
