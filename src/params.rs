//! The named-parameter bag
//!
//! Every renderable fragment carries its placeholder bindings in a
//! [`ParamBag`]. The bag preserves insertion order so that parameters can
//! be handed to a driver in the order their placeholders appear in the
//! SQL text.

use crate::value::Value;

/// An insertion-ordered collection of named parameters.
///
/// Key uniqueness is guaranteed by the render context's placeholder
/// counter, not by the bag itself; merging two bags from the same render
/// pass can never collide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBag {
    entries: Vec<(String, Value)>,
}

impl ParamBag {
    /// Create a new empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value under the given placeholder name
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    /// Absorb all bindings from another bag, preserving their order
    pub fn merge(&mut self, other: ParamBag) {
        self.entries.extend(other.entries);
    }

    /// Look up a binding by placeholder name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Check whether a placeholder name is bound
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Placeholder names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameters are bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take ownership of the bindings
    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl IntoIterator for ParamBag {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
