//! Page configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ConfigError;
use crate::routing::RouteTable;

pub const DEFAULT_STATUS_ELEMENT_ID: &str = "status";
pub const DEFAULT_PROBE_ROUTE: &str = "example.routes";
pub const DEFAULT_LOGOUT_ROUTE: &str = "example.logout";
pub const DEFAULT_LOGOUT_FALLBACK: &str = "/logout";

/// Logical route names the auth header relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRoutes {
    /// Authenticated endpoint probed to decide logged-in state.
    pub probe_route: String,
    /// Route the logout control navigates to.
    pub logout_route: String,
    /// Path used when `logout_route` cannot be resolved.
    pub logout_fallback: String,
}

impl Default for AuthRoutes {
    fn default() -> Self {
        Self {
            probe_route: DEFAULT_PROBE_ROUTE.to_owned(),
            logout_route: DEFAULT_LOGOUT_ROUTE.to_owned(),
            logout_fallback: DEFAULT_LOGOUT_FALLBACK.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Base for relative request URLs. Required by the reqwest transport
    /// unless every request URL is absolute.
    pub base_url: Option<String>,
    pub routes: RouteTable,
    pub status_element_id: String,
    pub auth: AuthRoutes,
    /// Unset means requests may stay pending indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            routes: RouteTable::default(),
            status_element_id: DEFAULT_STATUS_ELEMENT_ID.to_owned(),
            auth: AuthRoutes::default(),
            request_timeout: None,
        }
    }
}

impl PageConfig {
    /// Read a `.env` file when one exists, then parse the environment.
    ///
    /// # Errors
    ///
    /// See [`PageConfig::from_env`].
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, ".env file could not be read");
            }
        }
        Self::from_env()
    }

    /// Build typed page config from environment variables.
    ///
    /// Optional:
    /// - `PAGEWIRE_BASE_URL`
    /// - `PAGEWIRE_ROUTES`: JSON array of `{name, pattern}` (default empty)
    /// - `PAGEWIRE_STATUS_ID`: default `status`
    /// - `PAGEWIRE_PROBE_ROUTE`: default `example.routes`
    /// - `PAGEWIRE_LOGOUT_ROUTE`: default `example.logout`
    /// - `PAGEWIRE_LOGOUT_FALLBACK`: default `/logout`
    /// - `PAGEWIRE_REQUEST_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns an error for malformed route JSON or a non-numeric timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let routes = match env_non_empty("PAGEWIRE_ROUTES") {
            Some(raw) => RouteTable::from_json(&raw)?,
            None => RouteTable::default(),
        };

        let request_timeout = match env_non_empty("PAGEWIRE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    var: "PAGEWIRE_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let auth = AuthRoutes {
            probe_route: env_or("PAGEWIRE_PROBE_ROUTE", DEFAULT_PROBE_ROUTE),
            logout_route: env_or("PAGEWIRE_LOGOUT_ROUTE", DEFAULT_LOGOUT_ROUTE),
            logout_fallback: env_or("PAGEWIRE_LOGOUT_FALLBACK", DEFAULT_LOGOUT_FALLBACK),
        };

        tracing::debug!(routes = routes.len(), "page config loaded");
        Ok(Self {
            base_url: env_non_empty("PAGEWIRE_BASE_URL"),
            routes,
            status_element_id: env_or("PAGEWIRE_STATUS_ID", DEFAULT_STATUS_ELEMENT_ID),
            auth,
            request_timeout,
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_owned()),
        _ => None,
    }
}

fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
