//! Error types shared by every page facility.
//!
//! ERROR HANDLING
//! ==============
//! Two kinds reach callers. [`PreconditionError`] is returned synchronously
//! before any network or DOM work starts and is never swallowed internally.
//! [`RequestError`] is the normalized `{message, status_code}` shape every
//! failed request resolves to, whether the transport failed or the server
//! answered with `success: false`.

// =============================================================================
// PRECONDITION
// =============================================================================

/// Fatal caller-side mistakes detected before any async work is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// The page was built without the named capability (`"http"` or `"dom"`).
    #[error("{0} capability is required")]
    MissingCapability(&'static str),

    /// The HTTP method was empty after trimming.
    #[error("invalid http method")]
    InvalidMethod,

    /// No route definition carries this name.
    #[error("unknown route: {name}")]
    UnknownRoute { name: String },

    /// The definition exists but produced an empty path.
    #[error("invalid route pattern: {pattern}")]
    InvalidRoutePattern { pattern: String },

    /// A CSS selector could not be parsed.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

// =============================================================================
// REQUEST
// =============================================================================

/// Normalized failure of a JSON request.
///
/// `status_code` is 0 when the request never produced an HTTP status
/// (network error, unreachable host).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    pub status_code: u16,
}

impl RequestError {
    #[must_use]
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self { message: message.into(), status_code }
    }

    /// True for 401 and 403, the statuses the auth header treats as a rejected session.
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while loading [`crate::config::PageConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric environment value could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    /// The route table JSON was malformed.
    #[error("route table parse failed: {0}")]
    Routes(#[from] serde_json::Error),

    /// The base URL was not an absolute URL.
    #[error("invalid base url {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// UMBRELLA
// =============================================================================

/// Crate-level error so callers can `?` both halves of a request call:
/// `client.get_json(url)?.await?`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
