//! Route table injected at startup.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use serde::{Deserialize, Serialize};

/// A named URL pattern with `:param` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pattern: String,
}

impl RouteDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self { name: name.into(), pattern: pattern.into() }
    }
}

/// Ordered, read-only sequence of route definitions. Duplicates are allowed;
/// the first definition with a given name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    definitions: Vec<RouteDefinition>,
}

impl RouteTable {
    #[must_use]
    pub fn new(definitions: Vec<RouteDefinition>) -> Self {
        Self { definitions }
    }

    /// Parse a JSON array of `{name, pattern}` objects.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Find the first definition whose trimmed name equals the trimmed `name`.
    /// The returned definition carries the trimmed name and pattern.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<RouteDefinition> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.definitions
            .iter()
            .find(|definition| definition.name.trim() == name)
            .map(|definition| RouteDefinition::new(name, definition.pattern.trim()))
    }
}

impl FromIterator<RouteDefinition> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
