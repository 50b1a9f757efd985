//! Browser document over `web-sys`.
//!
//! DESIGN
//! ======
//! `web-sys` handles are not `Send`, so [`WebDocument`] holds none. Every
//! element a query returns is stamped with a [`NODE_ATTR`] attribute carrying
//! its [`NodeId`], and later calls find it again through that attribute.
//! Click closures live in a thread-local registry keyed by node so that
//! `off_click` can detach them. Node ids and the registry are shared by
//! every `WebDocument`, since a page has one document.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event};

use super::selector::AttrCondition;
use super::{ClickEvent, ClickHandler, Dom, NodeId, Selector};

/// Attribute holding the node id of an element seen by a query.
pub const NODE_ATTR: &str = "data-pagewire-node";

static NEXT_NODE: AtomicUsize = AtomicUsize::new(0);

type Listener = Closure<dyn FnMut(Event)>;

thread_local! {
    static LISTENERS: RefCell<HashMap<NodeId, Vec<Listener>>> = RefCell::new(HashMap::new());
}

/// [`Dom`] over `window.document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDocument;

impl WebDocument {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

// =============================================================================
// NODE HANDLES
// =============================================================================

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Selector that finds the element stamped with `node`.
fn node_selector(node: NodeId) -> Selector {
    Selector {
        attrs: vec![AttrCondition { name: NODE_ATTR.to_owned(), value: Some(node.0.to_string()) }],
        ..Selector::default()
    }
}

fn parse_node_id(raw: &str) -> Option<NodeId> {
    match raw.trim().parse() {
        Ok(id) => Some(NodeId(id)),
        Err(_) => None,
    }
}

fn element(node: NodeId) -> Option<Element> {
    let document = document()?;
    match document.query_selector(&node_selector(node).to_string()) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(?err, node = node.0, "element lookup failed");
            None
        }
    }
}

fn stamp(element: &Element) -> Option<NodeId> {
    if let Some(node) = element.get_attribute(NODE_ATTR).as_deref().and_then(parse_node_id) {
        return Some(node);
    }
    let node = NodeId(NEXT_NODE.fetch_add(1, Ordering::Relaxed));
    match element.set_attribute(NODE_ATTR, &node.0.to_string()) {
        Ok(()) => Some(node),
        Err(err) => {
            tracing::warn!(?err, "could not stamp element");
            None
        }
    }
}

fn report(result: Result<(), JsValue>, action: &'static str, node: NodeId) {
    if let Err(err) = result {
        tracing::warn!(?err, node = node.0, action, "document update failed");
    }
}

fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(url) {
        tracing::warn!(?err, %url, "navigation failed");
    }
}

// =============================================================================
// DOM
// =============================================================================

impl Dom for WebDocument {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let Some(document) = document() else {
            return Vec::new();
        };
        let list = match document.query_selector_all(&selector.to_string()) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(?err, %selector, "query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_ref::<Element>().and_then(stamp))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        element(node).map(|element| element.tag_name().to_ascii_lowercase())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        element(node)?.get_attribute(name)
    }

    fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = element(node) {
            report(element.set_attribute(name, value), "set attribute", node);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        element(node).is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = element(node) {
            let classes = element.class_list();
            for token in class.split_whitespace() {
                report(classes.add_1(token), "add class", node);
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = element(node) {
            let classes = element.class_list();
            for token in class.split_whitespace() {
                report(classes.remove_1(token), "remove class", node);
            }
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        element(node).map(|element| element.text_content().unwrap_or_default())
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn off_click(&self, node: NodeId) {
        let listeners = LISTENERS.with(|registry| registry.borrow_mut().remove(&node)).unwrap_or_default();
        let Some(element) = element(node) else {
            return;
        };
        for listener in &listeners {
            report(
                element.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref()),
                "remove click listener",
                node,
            );
        }
    }

    fn on_click(&self, node: NodeId, handler: ClickHandler) {
        let Some(element) = element(node) else {
            return;
        };
        let listener: Listener = Closure::wrap(Box::new(move |event: Event| {
            let mut click = ClickEvent::new(node);
            handler(&mut click);
            if click.default_prevented() {
                event.prevent_default();
            }
            if let Some(url) = click.navigation() {
                navigate(url);
            }
        }) as Box<dyn FnMut(Event)>);

        match element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref()) {
            Ok(()) => LISTENERS.with(|registry| registry.borrow_mut().entry(node).or_default().push(listener)),
            Err(err) => tracing::warn!(?err, node = node.0, "could not bind click listener"),
        }
    }
}
