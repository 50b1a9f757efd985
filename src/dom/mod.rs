//! Document capability used by wiring, status, and auth helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page helpers never touch a concrete document. They go through [`Dom`],
//! which exposes just what they need: compound selector queries, attribute
//! and class mutation, text, and click handler binding. `WebDocument`
//! (feature `hydrate`) drives the live page; `MemoryDocument` is the
//! in-process stand-in used for pre-rendering and tests.

pub mod memory;
pub mod selector;
#[cfg(feature = "hydrate")]
pub mod web;

use std::sync::Arc;

pub use memory::{Element, MemoryDocument};
pub use selector::Selector;
#[cfg(feature = "hydrate")]
pub use web::WebDocument;

/// Class that hides an element.
pub const HIDDEN_CLASS: &str = "d-none";

/// Opaque element handle, valid for the document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Click handler bound to an element.
pub type ClickHandler = Arc<dyn Fn(&mut ClickEvent) + Send + Sync>;

/// A click delivered to bound handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
    default_prevented: bool,
    navigation: Option<String>,
}

impl ClickEvent {
    #[must_use]
    pub fn new(target: NodeId) -> Self {
        Self { target, default_prevented: false, navigation: None }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the document to navigate once handlers have run. The last request wins.
    pub fn navigate(&mut self, url: impl Into<String>) {
        self.navigation = Some(url.into());
    }

    #[must_use]
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }
}

/// Mutable view of a page document.
pub trait Dom: Send + Sync {
    /// Matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// Lower-cased tag name.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attr(&self, node: NodeId, name: &str, value: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&self, node: NodeId, class: &str);

    fn remove_class(&self, node: NodeId, class: &str);

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&self, node: NodeId, text: &str);

    /// Remove every click handler bound to `node`.
    fn off_click(&self, node: NodeId);

    fn on_click(&self, node: NodeId, handler: ClickHandler);

    /// Show (`true`) or hide (`false`) an element via [`HIDDEN_CLASS`].
    fn set_visible(&self, node: NodeId, visible: bool) {
        if visible {
            self.remove_class(node, HIDDEN_CLASS);
        } else {
            self.add_class(node, HIDDEN_CLASS);
        }
    }
}
