//! Ordered, name-keyed collections of variables.
//!
//! A [`VariableCollection`] owns every definition of an action's inputs. It
//! merges repeated definitions, accepts values by keyword or position, and
//! answers the type-indexed queries the request builder needs.
//!
//! Names that collide with a reserved identifier (for example `from`) are
//! stored under an escaped key (`_from`) while the variable itself keeps its
//! external name. Names that already start with the escape prefix are escaped
//! too (`_from` is stored as `__from`), so no two names share a key. Lookups
//! by external name go through [`escape_name`], so callers never need to know
//! about the escaped form.

use super::error::VariableError;
use super::variable::{merge, Variable, VariableSpec, DEFAULT_VARIABLE_TYPE};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Identifiers that may not be used as storage keys.
pub const RESERVED_NAMES: &[&str] = &[
    // Python keywords
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
    // Rust keywords not already covered
    "const", "crate", "dyn", "enum", "extern", "false", "fn", "impl", "let", "loop", "match",
    "mod", "move", "mut", "pub", "ref", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where",
];

const ESCAPE_PREFIX: char = '_';

/// Returns the storage key for an external variable name.
///
/// Reserved names and names starting with `_` get one extra `_`.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if RESERVED_NAMES.contains(&name) || name.starts_with(ESCAPE_PREFIX) {
        Cow::Owned(format!("{}{}", ESCAPE_PREFIX, name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Returns the external name for a storage key produced by [`escape_name`].
///
/// Strips exactly one `_` when the key is an escaped form; other keys are
/// returned unchanged.
pub fn unescape_name(key: &str) -> &str {
    match key.strip_prefix(ESCAPE_PREFIX) {
        Some(rest) if RESERVED_NAMES.contains(&rest) || rest.starts_with(ESCAPE_PREFIX) => rest,
        _ => key,
    }
}

/// An ordered mapping from storage key to [`Variable`].
///
/// Iteration follows insertion order. Merging a definition into an existing
/// entry keeps the entry's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCollection {
    entries: Vec<(String, Variable)>,
}

impl VariableCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from `(name, definition)` pairs.
    pub fn from_specs<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = (S, VariableSpec)>,
        S: AsRef<str>,
    {
        let mut collection = Self::new();
        collection.add_all(specs);
        collection
    }

    /// Adds one definition.
    ///
    /// If the name already exists the stored variable is replaced by
    /// `merge(existing, new)`, so the new definition overrides the old one.
    pub fn add(&mut self, name: &str, spec: VariableSpec) {
        let key = escape_name(name);
        let incoming = Variable::from_spec(spec).with_name(name);

        match self.position(&key) {
            Some(index) => {
                let merged = merge(&self.entries[index].1, &incoming);
                self.entries[index].1 = merged;
            }
            None => self.entries.push((key.into_owned(), incoming)),
        }
    }

    /// Adds several definitions in order.
    pub fn add_all<I, S>(&mut self, specs: I)
    where
        I: IntoIterator<Item = (S, VariableSpec)>,
        S: AsRef<str>,
    {
        for (name, spec) in specs {
            self.add(name.as_ref(), spec);
        }
    }

    /// Merges every variable of `other` into this collection.
    pub fn extend_from(&mut self, other: &VariableCollection) {
        for (key, incoming) in &other.entries {
            match self.position(key) {
                Some(index) => {
                    let merged = merge(&self.entries[index].1, incoming);
                    self.entries[index].1 = merged;
                }
                None => self.entries.push((key.clone(), incoming.clone())),
            }
        }
    }

    /// Union of every member's types, in first-seen order.
    ///
    /// The implicit default type is always included, even for an empty collection.
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for var_type in self.entries.iter().flat_map(|(_, v)| v.types()) {
            if !types.iter().any(|t| t == var_type) {
                types.push(var_type.to_string());
            }
        }
        if !types.iter().any(|t| t == DEFAULT_VARIABLE_TYPE) {
            types.push(DEFAULT_VARIABLE_TYPE.to_string());
        }
        types
    }

    /// Sub-collection of the members that carry `var_type`.
    pub fn vals(&self, var_type: &str) -> VariableCollection {
        VariableCollection {
            entries: self
                .entries
                .iter()
                .filter(|(_, v)| v.has_type(var_type))
                .cloned()
                .collect(),
        }
    }

    /// Sets values by name.
    ///
    /// # Arguments
    ///
    /// * `values` - `(external name, value)` pairs, e.g. `("from", json!("2024-01-01"))`
    ///
    /// # Returns
    ///
    /// `Ok(())` once every value is applied, or
    /// [`VariableError::UnknownVariable`] for the first name the collection
    /// does not define. Names are checked before anything is applied, so a
    /// failed call leaves the collection unchanged.
    pub fn fill_kwargs<I, S>(&mut self, values: I) -> Result<(), VariableError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let resolved = values
            .into_iter()
            .map(|(name, value)| {
                let name = name.as_ref();
                self.position(&escape_name(name))
                    .map(|index| (index, value))
                    .ok_or_else(|| VariableError::UnknownVariable(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, value) in resolved {
            let filled = self.entries[index].1.with_value(value);
            self.entries[index].1 = filled;
        }
        Ok(())
    }

    /// Fills the single unfilled variable whose only type is the default type.
    ///
    /// # Arguments
    ///
    /// * `value` - The positional value
    ///
    /// # Returns
    ///
    /// `Ok(())` when exactly one slot took the value, or
    /// [`VariableError::AmbiguousFill`] listing the candidates when there are
    /// zero or several such slots.
    pub fn fill_arg(&mut self, value: Value) -> Result<(), VariableError> {
        let candidates: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (_, v))| v.is_default_typed() && !v.is_filled())
            .map(|(i, _)| i)
            .collect();

        match candidates.as_slice() {
            [index] => {
                let filled = self.entries[*index].1.with_value(value);
                self.entries[*index].1 = filled;
                Ok(())
            }
            _ => Err(VariableError::AmbiguousFill {
                candidates: candidates
                    .iter()
                    .map(|&i| self.entries[i].1.name().to_string())
                    .collect(),
            }),
        }
    }

    /// Applies an optional positional value, then keyword values.
    ///
    /// # Arguments
    ///
    /// * `arg` - Value for the single unnamed slot, if any
    /// * `kwargs` - `(external name, value)` pairs
    ///
    /// # Returns
    ///
    /// `Ok(())` when both steps succeed. Supplying neither fails with
    /// [`VariableError::NoArguments`]; otherwise the first error from
    /// [`fill_arg`](Self::fill_arg) or [`fill_kwargs`](Self::fill_kwargs) is
    /// returned and the collection is left as it was. Whether every required
    /// variable ended up filled is checked separately through
    /// [`missing_vars`](Self::missing_vars).
    pub fn fill<I, S>(&mut self, arg: Option<Value>, kwargs: I) -> Result<(), VariableError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let kwargs: Vec<(S, Value)> = kwargs.into_iter().collect();
        if arg.is_none() && kwargs.is_empty() {
            return Err(VariableError::NoArguments);
        }

        let mut staged = self.clone();
        if let Some(value) = arg {
            staged.fill_arg(value)?;
        }
        staged.fill_kwargs(kwargs)?;
        *self = staged;
        Ok(())
    }

    /// External names of members that are neither filled nor optional.
    pub fn missing_vars(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_filled())
            .map(|(_, v)| v.name().to_string())
            .collect()
    }

    /// Looks a variable up by its external name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.get_key(&escape_name(name))
    }

    /// Looks a variable up by its storage key.
    pub fn get_key(&self, key: &str) -> Option<&Variable> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Checks for a storage key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Iterates `(storage key, variable)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<S: AsRef<str>> FromIterator<(S, VariableSpec)> for VariableCollection {
    fn from_iter<I: IntoIterator<Item = (S, VariableSpec)>>(iter: I) -> Self {
        Self::from_specs(iter)
    }
}

/// Deserializes from a `name -> definition` map, keeping document order and
/// merging repeated names the same way [`VariableCollection::add`] does.
impl<'de> Deserialize<'de> for VariableCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = VariableCollection;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of variable names to definitions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = VariableCollection::new();
                while let Some((name, spec)) = map.next_entry::<String, VariableSpec>()? {
                    collection.add(&name, spec);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}
