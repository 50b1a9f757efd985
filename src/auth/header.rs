//! Login/logout header toggling.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages render both a login and a logout control. On load the header probes
//! an authenticated endpoint and shows whichever control applies. Probe
//! errors never escape: every failure reads as "logged out".
//!
//! STATE
//! =====
//! `Unknown -> Probing -> {LoggedIn, LoggedOut}` per call to
//! [`AuthHeader::init`]; calling it again restarts the cycle.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::AuthRoutes;
use crate::dom::{ClickEvent, ClickHandler, Dom, NodeId, Selector};
use crate::error::{PreconditionError, RequestError};
use crate::net::api::JsonClient;
use crate::routing::{RouteParameters, RouteTable};

pub const DEFAULT_LOGIN_SELECTOR: &str = "#loginButton";
pub const DEFAULT_LOGOUT_SELECTOR: &str = "#logoutButton";

/// Selectors for the two header controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaderOptions {
    pub login_selector: String,
    pub logout_selector: String,
}

impl Default for AuthHeaderOptions {
    fn default() -> Self {
        Self {
            login_selector: DEFAULT_LOGIN_SELECTOR.to_owned(),
            logout_selector: DEFAULT_LOGOUT_SELECTOR.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggedOutReason {
    /// The probe answered 401 or 403.
    Rejected(u16),
    /// Any other failure, including an unresolvable probe route.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unknown,
    Probing,
    LoggedIn,
    LoggedOut(LoggedOutReason),
}

/// Drives the header controls of one document.
pub struct AuthHeader {
    dom: Arc<dyn Dom>,
    client: JsonClient,
    routes: Arc<RouteTable>,
    auth_routes: AuthRoutes,
    state: Mutex<AuthState>,
}

impl AuthHeader {
    #[must_use]
    pub fn new(dom: Arc<dyn Dom>, client: JsonClient, routes: Arc<RouteTable>, auth_routes: AuthRoutes) -> Self {
        Self { dom, client, routes, auth_routes, state: Mutex::new(AuthState::Unknown) }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Probe the session and toggle the controls.
    ///
    /// Returns [`AuthState::Unknown`] without probing when either control is
    /// missing. A 401/403 probe shows the login control and returns before
    /// the logout handler is bound; every other outcome (re)binds it.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without an HTTP
    /// transport and [`PreconditionError::InvalidSelector`] for bad selectors.
    pub async fn init(&self, options: &AuthHeaderOptions) -> Result<AuthState, PreconditionError> {
        if !self.client.is_attached() {
            return Err(PreconditionError::MissingCapability("http"));
        }
        self.transition(AuthState::Unknown);

        let login_nodes = self.dom.query_all(&Selector::parse(&options.login_selector)?);
        let logout_nodes = self.dom.query_all(&Selector::parse(&options.logout_selector)?);
        if login_nodes.is_empty() || logout_nodes.is_empty() {
            tracing::debug!(
                login = %options.login_selector,
                logout = %options.logout_selector,
                "auth header controls not found"
            );
            return Ok(AuthState::Unknown);
        }

        self.transition(AuthState::Probing);
        let state = match self.probe().await {
            Ok(()) => {
                self.show(&login_nodes, &logout_nodes, true);
                self.transition(AuthState::LoggedIn)
            }
            Err(err) if err.is_auth_rejection() => {
                self.show(&login_nodes, &logout_nodes, false);
                return Ok(self.transition(AuthState::LoggedOut(LoggedOutReason::Rejected(err.status_code))));
            }
            Err(err) => {
                tracing::debug!(status = err.status_code, error = %err.message, "auth probe failed");
                self.show(&login_nodes, &logout_nodes, false);
                self.transition(AuthState::LoggedOut(LoggedOutReason::Failed))
            }
        };

        let handler = logout_handler(self.routes.clone(), self.auth_routes.clone());
        for node in &logout_nodes {
            self.dom.off_click(*node);
            self.dom.on_click(*node, handler.clone());
        }
        Ok(state)
    }

    async fn probe(&self) -> Result<(), RequestError> {
        let pending = self
            .routes
            .route(&self.auth_routes.probe_route, &RouteParameters::new())
            .and_then(|url| self.client.get_json(&url))
            .map_err(|err| RequestError::new(err.to_string(), 0))?;
        pending.await.map(|_| ())
    }

    fn show(&self, login_nodes: &[NodeId], logout_nodes: &[NodeId], logged_in: bool) {
        for node in login_nodes {
            self.dom.set_visible(*node, !logged_in);
        }
        for node in logout_nodes {
            self.dom.set_visible(*node, logged_in);
        }
    }

    fn transition(&self, next: AuthState) -> AuthState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = *state;
        if previous != next {
            tracing::info!(from = ?previous, to = ?next, "auth header state");
        }
        *state = next;
        next
    }
}

/// Navigate to the logout route, or the fallback path when it cannot be resolved.
fn logout_handler(routes: Arc<RouteTable>, auth_routes: AuthRoutes) -> ClickHandler {
    Arc::new(move |event: &mut ClickEvent| {
        event.prevent_default();
        match routes.route(&auth_routes.logout_route, &RouteParameters::new()) {
            Ok(url) => event.navigate(url),
            Err(err) => {
                tracing::debug!(error = %err, fallback = %auth_routes.logout_fallback, "logout route unresolved");
                event.navigate(auth_routes.logout_fallback.clone());
            }
        }
    })
}
