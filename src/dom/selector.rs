//! Compound CSS selectors: `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`.
//!
//! Combinators and pseudo-classes are out of scope. A selector list (`a, b`)
//! is not supported either; callers query each selector separately.
//!
//! A parsed selector renders back to CSS through `Display`, which is what the
//! browser document hands to `querySelectorAll`. The in-memory document
//! evaluates it with [`Selector::matches`] instead.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::fmt;

use crate::error::PreconditionError;

/// Attribute condition inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCondition {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed compound selector. Every present part must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl Selector {
    /// Parse a compound selector.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InvalidSelector`] for blank input, empty
    /// names, unterminated brackets, and unsupported characters.
    pub fn parse(raw: &str) -> Result<Self, PreconditionError> {
        let input = raw.trim();
        let invalid = || PreconditionError::InvalidSelector(raw.to_owned());
        if input.is_empty() {
            return Err(invalid());
        }

        let mut selector = Self::default();
        let mut rest = input;

        let tag_len = name_len(rest);
        if tag_len > 0 {
            selector.tag = Some(rest[..tag_len].to_ascii_lowercase());
            rest = &rest[tag_len..];
        } else if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        }

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            match marker {
                '#' | '.' => {
                    let len = name_len(rest);
                    if len == 0 {
                        return Err(invalid());
                    }
                    let name = rest[..len].to_owned();
                    rest = &rest[len..];
                    if marker == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                }
                '[' => {
                    let close = rest.find(']').ok_or_else(invalid)?;
                    let condition = parse_attr(&rest[..close]).ok_or_else(invalid)?;
                    selector.attrs.push(condition);
                    rest = &rest[close + 1..];
                }
                _ => return Err(invalid()),
            }
        }

        Ok(selector)
    }

    /// Check an element description against this selector.
    pub fn matches<'a>(
        &self,
        tag: &str,
        classes: &[String],
        mut attr: impl FnMut(&str) -> Option<&'a str>,
    ) -> bool {
        if self.tag.as_deref().is_some_and(|t| !t.eq_ignore_ascii_case(tag)) {
            return false;
        }
        if let Some(id) = &self.id {
            if attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|condition| match (attr(condition.name.as_str()), &condition.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            f.write_str("#")?;
            write_ident(f, id)?;
        }
        for class in &self.classes {
            f.write_str(".")?;
            write_ident(f, class)?;
        }
        for condition in &self.attrs {
            write!(f, "[{}", condition.name)?;
            if let Some(value) = &condition.value {
                f.write_str("=\"")?;
                for c in value.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// CSS identifiers may not start with a digit; escape it as a code point.
fn write_ident(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    let mut chars = ident.chars();
    if let Some(first) = chars.next() {
        if first.is_ascii_digit() {
            write!(f, "\\{:x} ", u32::from(first))?;
        } else {
            write!(f, "{first}")?;
        }
    }
    f.write_str(chars.as_str())
}

fn name_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_')).unwrap_or(s.len())
}

fn parse_attr(inner: &str) -> Option<AttrCondition> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_owned()))
        }
        None => (inner.trim(), None),
    };
    if name.is_empty() || name_len(name) != name.len() {
        return None;
    }
    Some(AttrCondition { name: name.to_ascii_lowercase(), value })
}
