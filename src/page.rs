//! Page facade grouping the helpers the way page scripts call them.
//!
//! DESIGN
//! ======
//! A [`Page`] owns the injected capabilities (document, HTTP transport), the
//! read-only route table, and the config. Helpers are reached through four
//! borrowed groups: `http()`, `ui()`, `routing()`, `auth()`. A page may be
//! built without either capability; helpers that need a missing one fail
//! with [`PreconditionError::MissingCapability`].

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::sync::Arc;

use crate::auth::{AuthHeader, AuthHeaderOptions, AuthState};
use crate::config::PageConfig;
use crate::dom::{Dom, Selector};
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ConfigError;
use crate::error::PreconditionError;
use crate::net::api::JsonClient;
#[cfg(feature = "hydrate")]
use crate::dom::WebDocument;
#[cfg(feature = "hydrate")]
use crate::net::gloo::GlooTransport;
#[cfg(not(target_arch = "wasm32"))]
use crate::net::transport::ReqwestTransport;
use crate::net::transport::Transport;
use crate::routing::{RouteParameters, RouteTable, WiringReport, resolve_data_routes};
use crate::ui::set_status;

pub struct Page {
    dom: Option<Arc<dyn Dom>>,
    http: JsonClient,
    routes: Arc<RouteTable>,
    config: PageConfig,
    auth: Option<AuthHeader>,
}

#[derive(Default)]
pub struct PageBuilder {
    dom: Option<Arc<dyn Dom>>,
    transport: Option<Arc<dyn Transport>>,
    config: PageConfig,
}

impl PageBuilder {
    #[must_use]
    pub fn dom(mut self, dom: Arc<dyn Dom>) -> Self {
        self.dom = Some(dom);
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    /// Drive the live page: `window.document` and `fetch`.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn browser(self) -> Self {
        self.dom(Arc::new(WebDocument::new())).transport(Arc::new(GlooTransport::new()))
    }

    /// Use a `ReqwestTransport` built from the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the client fails to build.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn reqwest_transport(self) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(self.config.base_url.as_deref(), self.config.request_timeout)?;
        Ok(self.transport(Arc::new(transport)))
    }

    #[must_use]
    pub fn build(self) -> Page {
        let http = self.transport.map_or_else(JsonClient::detached, JsonClient::new);
        let routes = Arc::new(self.config.routes.clone());
        let auth = self
            .dom
            .clone()
            .map(|dom| AuthHeader::new(dom, http.clone(), routes.clone(), self.config.auth.clone()));
        Page { dom: self.dom, http, routes, config: self.config, auth }
    }
}

impl Page {
    #[must_use]
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// JSON request helpers.
    #[must_use]
    pub fn http(&self) -> &JsonClient {
        &self.http
    }

    #[must_use]
    pub fn ui(&self) -> Ui<'_> {
        Ui { page: self }
    }

    #[must_use]
    pub fn routing(&self) -> Routing<'_> {
        Routing { page: self }
    }

    #[must_use]
    pub fn auth(&self) -> Auth<'_> {
        Auth { page: self }
    }

    /// Document-ready hook: wire `data-route` elements, logging instead of
    /// propagating any failure.
    pub fn ready(&self) -> Option<WiringReport> {
        match self.routing().resolve_data_routes() {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(error = %err, "data route wiring skipped");
                None
            }
        }
    }

    fn require_dom(&self) -> Result<&dyn Dom, PreconditionError> {
        self.dom.as_deref().ok_or(PreconditionError::MissingCapability("dom"))
    }
}

/// Status display helpers.
pub struct Ui<'a> {
    page: &'a Page,
}

impl Ui<'_> {
    /// Write a message into the configured status element.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a document.
    pub fn set_status(&self, text: &str, variant: Option<&str>) -> Result<(), PreconditionError> {
        let dom = self.page.require_dom()?;
        let target = Selector { id: Some(self.page.config.status_element_id.clone()), ..Selector::default() };
        set_status(dom, &target, text, variant);
        Ok(())
    }
}

/// Route resolution helpers.
pub struct Routing<'a> {
    page: &'a Page,
}

impl Routing<'_> {
    /// Resolve a named route. Does not need the document.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::UnknownRoute`] or
    /// [`PreconditionError::InvalidRoutePattern`].
    pub fn route(&self, name: &str, parameters: &RouteParameters) -> Result<String, PreconditionError> {
        self.page.routes.route(name, parameters)
    }

    /// Wire every `data-route` element.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a document.
    pub fn resolve_data_routes(&self) -> Result<WiringReport, PreconditionError> {
        let dom = self.page.require_dom()?;
        Ok(resolve_data_routes(dom, &self.page.routes))
    }
}

/// Auth header helpers.
pub struct Auth<'a> {
    page: &'a Page,
}

impl Auth<'_> {
    /// Probe the session and toggle the header controls.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a document or
    /// transport, and [`PreconditionError::InvalidSelector`] for bad selectors.
    pub async fn init_auth_header(&self, options: &AuthHeaderOptions) -> Result<AuthState, PreconditionError> {
        let header = self.page.auth.as_ref().ok_or(PreconditionError::MissingCapability("dom"))?;
        header.init(options).await
    }

    /// Current header state; [`AuthState::Unknown`] without a document.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.page.auth.as_ref().map_or(AuthState::Unknown, AuthHeader::state)
    }
}
