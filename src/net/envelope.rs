//! Response envelope validation and failure normalization.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend wraps every JSON response as `{success, errors?, ...payload}`.
//! [`Envelope`] classifies a decoded body at the boundary, and
//! [`normalize_transport_failure`] folds transport-level failures into the
//! same [`RequestError`] shape so callers only ever match one error type.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde_json::Value;

use super::transport::TransportFailure;
use crate::error::RequestError;
use crate::value::coerce_to_string;

/// Message used whenever neither the body nor the transport offers one.
pub const FALLBACK_MESSAGE: &str = "request failed";

/// A decoded response body, classified by its `success` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `success` was strictly `true`; carries the untouched body.
    Success(Value),
    /// Anything else; carries the `errors` entries when present.
    Failure { errors: Vec<Value> },
}

impl Envelope {
    /// Classify a decoded body. Non-object bodies are failures.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        if body.get("success") == Some(&Value::Bool(true)) {
            return Self::Success(body);
        }
        let errors = match body.get("errors") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        Self::Failure { errors }
    }

    /// Convert into the caller-facing result, tagging failures with `status_code`.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] carrying the first `errors` entry, or
    /// [`FALLBACK_MESSAGE`] when there is none.
    pub fn into_result(self, status_code: u16) -> Result<Value, RequestError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Failure { errors } => {
                let message = match errors.first() {
                    None | Some(Value::Null) => FALLBACK_MESSAGE.to_owned(),
                    Some(first) => coerce_to_string(first),
                };
                Err(RequestError::new(message, status_code))
            }
        }
    }
}

/// Fold a transport failure into a [`RequestError`].
///
/// The message is `responseJSON.errors[0]`, trimmed, when it is non-blank;
/// later entries are not consulted. Otherwise it is the trimmed status text,
/// then [`FALLBACK_MESSAGE`].
#[must_use]
pub fn normalize_transport_failure(failure: &TransportFailure) -> RequestError {
    let first_error = match failure.response_json.as_ref().and_then(|json| json.get("errors")) {
        Some(Value::Array(items)) => items.first().map(|v| coerce_to_string(v).trim().to_owned()),
        _ => None,
    }
    .unwrap_or_default();

    if !first_error.is_empty() {
        return RequestError::new(first_error, failure.status);
    }

    let status_text = failure.status_text.as_deref().map(str::trim).unwrap_or_default();
    let message = if status_text.is_empty() { FALLBACK_MESSAGE } else { status_text };
    RequestError::new(message, failure.status)
}
