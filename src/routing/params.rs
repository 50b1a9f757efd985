//! Ordered route parameters.

use serde_json::{Map, Value};

use crate::value::coerce_to_string;

/// Parameter name → string value, in insertion order.
///
/// Order matters: substitution runs key by key, so when one name is a prefix
/// of another (`:id` / `:identifier`) the earlier key wins the overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters {
    entries: Vec<(String, String)>,
}

impl RouteParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, replacing the value in place if the key exists.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build parameters from a decoded JSON value. Only objects contribute;
    /// every other shape yields no parameters.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            _ => Self::new(),
        }
    }
}

impl From<&Map<String, Value>> for RouteParameters {
    fn from(map: &Map<String, Value>) -> Self {
        Self { entries: map.iter().map(|(k, v)| (k.clone(), coerce_to_string(v))).collect() }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RouteParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
