//! Declarative route binding for `data-route` elements.
//!
//! SYSTEM CONTEXT
//! ==============
//! Markup opts in with `data-route="name"` and optional
//! `data-route-params='{"id": 7}'`. The pass is best-effort: each element is
//! resolved independently and a failure only skips that element.

#[cfg(test)]
#[path = "wiring_test.rs"]
mod wiring_test;

use serde_json::Value;

use super::params::RouteParameters;
use super::table::RouteTable;
use crate::dom::selector::AttrCondition;
use crate::dom::{Dom, NodeId, Selector};
use crate::error::PreconditionError;

pub const ROUTE_ATTR: &str = "data-route";
pub const ROUTE_PARAMS_ATTR: &str = "data-route-params";
pub const ROUTE_URL_ATTR: &str = "data-route-url";

/// Why an element was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `data-route` was present but blank.
    BlankName,
    /// The route could not be resolved.
    Unresolved(PreconditionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedElement {
    pub node: NodeId,
    pub route_name: String,
    pub reason: SkipReason,
}

/// Outcome of one wiring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringReport {
    /// Elements whose target attribute was written.
    pub bound: Vec<NodeId>,
    /// Elements that resolved but have no target attribute for their tag.
    pub unbound: Vec<NodeId>,
    pub skipped: Vec<SkippedElement>,
}

/// Attribute a resolved URL is written to, by tag.
#[must_use]
pub fn target_attribute(tag: &str) -> Option<&'static str> {
    match tag {
        "a" => Some("href"),
        "form" => Some("action"),
        "button" => Some(ROUTE_URL_ATTR),
        _ => None,
    }
}

/// Parse `data-route-params`. Blank, malformed, or non-object JSON yields no parameters.
#[must_use]
pub fn parse_route_params(raw: Option<&str>) -> RouteParameters {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return RouteParameters::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => RouteParameters::from_json_value(&value),
        Err(e) => {
            tracing::debug!(error = %e, params = raw, "ignoring malformed route params");
            RouteParameters::new()
        }
    }
}

/// Resolve every `data-route` element in `dom` against `routes`.
pub fn resolve_data_routes(dom: &dyn Dom, routes: &RouteTable) -> WiringReport {
    let selector = Selector {
        attrs: vec![AttrCondition { name: ROUTE_ATTR.to_owned(), value: None }],
        ..Selector::default()
    };

    let mut report = WiringReport::default();
    for node in dom.query_all(&selector) {
        let route_name = dom.attr(node, ROUTE_ATTR).unwrap_or_default().trim().to_owned();
        if route_name.is_empty() {
            report.skipped.push(SkippedElement { node, route_name, reason: SkipReason::BlankName });
            continue;
        }

        let params = parse_route_params(dom.attr(node, ROUTE_PARAMS_ATTR).as_deref());
        let url = match routes.route(&route_name, &params) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(route = %route_name, error = %err, "skipping data-route element");
                report.skipped.push(SkippedElement { node, route_name, reason: SkipReason::Unresolved(err) });
                continue;
            }
        };

        let tag = dom.tag_name(node).unwrap_or_default();
        match target_attribute(&tag) {
            Some(attribute) => {
                dom.set_attr(node, attribute, &url);
                report.bound.push(node);
            }
            None => report.unbound.push(node),
        }
    }

    tracing::debug!(
        bound = report.bound.len(),
        unbound = report.unbound.len(),
        skipped = report.skipped.len(),
        "data routes resolved"
    );
    report
}
