//! String key/value parameters carried by configurations, bundles and checkers.

use indexmap::IndexMap;
use xmltree::Element;

use crate::xml::{attr, push_child, set_attr};

pub const TAG_PARAM: &str = "Param";
pub const ATTR_NAME: &str = "name";
pub const ATTR_VALUE: &str = "value";

/// Ordered map of parameters. Keys are unique; the last write wins.
///
/// Iteration follows insertion order so serialized output is stable, but
/// callers must not attach meaning to that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: IndexMap<String, String>,
}

impl ParameterMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    ///
    /// Numbers are stored in their textual form.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.insert(name.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the value of `name`, or `default` when it is not set.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes `name`. Returns whether it was present.
    pub fn delete(&mut self, name: &str) -> bool {
        self.entries.shift_remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copies every entry of `other` into `self`; `other` wins on conflicts.
    pub fn overwrite(&mut self, other: &Self) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends one `<Param name=".." value=".."/>` per entry to `parent`.
    pub fn write_xml(&self, parent: &mut Element) {
        for (name, value) in &self.entries {
            let mut param = Element::new(TAG_PARAM);
            set_attr(&mut param, ATTR_NAME, name);
            set_attr(&mut param, ATTR_VALUE, value);
            push_child(parent, param);
        }
    }

    /// Reads a single `Param` element into the map.
    pub fn parse_xml(&mut self, element: &Element) {
        self.set(attr(element, ATTR_NAME), attr(element, ATTR_VALUE));
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
