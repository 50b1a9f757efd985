//! Pattern-to-path substitution.
//!
//! DESIGN
//! ======
//! Substitution is literal: each `:key` token is replaced wherever it occurs,
//! parameter by parameter. There is no segment parsing, so optional or
//! wildcard segments are not understood and unmatched tokens stay in place.

#[cfg(test)]
#[path = "generate_test.rs"]
mod generate_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::params::RouteParameters;
use super::table::RouteTable;
use crate::error::PreconditionError;

/// Characters left unescaped by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URI component.
#[must_use]
pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Substitute `parameters` into `pattern`. Returns an empty string for a blank pattern.
#[must_use]
pub fn generate_path(pattern: &str, parameters: &RouteParameters) -> String {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return String::new();
    }

    let mut path = pattern.to_owned();
    for (key, value) in parameters.iter() {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let token = format!(":{key}");
        path = path.replace(&token, &encode_uri_component(value.trim()));
    }
    path
}

impl RouteTable {
    /// Resolve a named route into a path.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::UnknownRoute`] when no definition matches and
    /// [`PreconditionError::InvalidRoutePattern`] when the path comes out empty.
    pub fn route(&self, name: &str, parameters: &RouteParameters) -> Result<String, PreconditionError> {
        let definition = self
            .lookup(name)
            .ok_or_else(|| PreconditionError::UnknownRoute { name: name.to_owned() })?;

        let path = generate_path(&definition.pattern, parameters);
        if path.is_empty() {
            return Err(PreconditionError::InvalidRoutePattern { pattern: definition.pattern });
        }
        Ok(path)
    }
}
