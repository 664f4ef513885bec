//! Tag maps and tag overrides.
//!
//! Both keep insertion order so the generated XML lists tags in the order
//! ffprobe reported them, with user-added tags appended at the end.

use std::str::FromStr;

use serde_json::Value;

use crate::tags::TagError;

/// Ordered string-to-string tag mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    entries: Vec<(String, String)>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tags from a JSON object such as ffprobe's `tags`.
    ///
    /// Non-string scalars are stringified; `null` entries are dropped.
    /// Anything other than an object yields empty tags.
    pub fn from_json(value: &Value) -> Self {
        let mut tags = Self::new();
        if let Some(obj) = value.as_object() {
            for (key, value) in obj {
                if let Some(s) = scalar_to_string(value) {
                    tags.insert(key.clone(), s);
                }
            }
        }
        tags
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a tag. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append a tag without looking for an existing entry of the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Merge overrides into these tags. `None` values delete the key.
    pub fn apply_overrides(&mut self, overrides: &TagOverrides) {
        for (key, value) in overrides.iter() {
            match value {
                Some(value) => self.insert(key, value),
                None => {
                    self.remove(key);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// User supplied patch for a tag map. A `None` value removes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOverrides {
    entries: Vec<(String, Option<String>)>,
}

impl TagOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from a JSON object.
    ///
    /// Strings, numbers and booleans set a tag, `null` removes it.
    /// Nested arrays or objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self, TagError> {
        let obj = value
            .as_object()
            .ok_or_else(|| TagError::invalid_overrides("expected a JSON object"))?;

        let mut overrides = Self::new();
        for (key, value) in obj {
            let value = match value {
                Value::Null => None,
                other => Some(scalar_to_string(other).ok_or_else(|| {
                    TagError::invalid_overrides(format!(
                        "value for '{}' must be a string, number, boolean or null",
                        key
                    ))
                })?),
            };
            overrides.set(key.clone(), value);
        }
        Ok(overrides)
    }

    /// Set (or replace) an override entry.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Whether this override removes `key`.
    pub fn removes(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, v)| k == key && v.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for TagOverrides {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
