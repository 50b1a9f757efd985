//! In-process document.
//!
//! DESIGN
//! ======
//! A flat arena of elements behind one mutex. Structure (parent/child) is not
//! modelled because no page helper walks the tree; queries scan in insertion
//! order, which stands in for document order. Click handlers are cloned out
//! of the lock before they run, so handlers may freely call back into the
//! document.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ClickEvent, ClickHandler, Dom, NodeId, Selector};

/// Element description used to populate a [`MemoryDocument`].
#[derive(Clone, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    handlers: Vec<ClickHandler>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), ..Self::default() }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    fn attr(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("class") {
            return None;
        }
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes.clear();
            for class in value.split_whitespace() {
                self.add_class(class);
            }
            return;
        }
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => value.clone_into(&mut entry.1),
            None => self.attributes.push((name, value.to_owned())),
        }
    }

    fn add_class(&mut self, class: &str) {
        for class in class.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&mut self, class: &str) {
        let removed: Vec<&str> = class.split_whitespace().collect();
        self.classes.retain(|c| !removed.contains(&c.as_str()));
    }

    fn matches(&self, selector: &Selector) -> bool {
        let class_name = self.classes.join(" ");
        selector.matches(&self.tag, &self.classes, |name| {
            if name.eq_ignore_ascii_case("class") {
                (!class_name.is_empty()).then_some(class_name.as_str())
            } else {
                self.attr(name)
            }
        })
    }
}

#[derive(Default)]
struct DocumentState {
    elements: Vec<Element>,
    location: Option<String>,
}

/// Thread-safe in-memory [`Dom`].
#[derive(Default)]
pub struct MemoryDocument {
    state: Mutex<DocumentState>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its handle.
    pub fn insert(&self, element: Element) -> NodeId {
        let mut state = self.lock();
        state.elements.push(element);
        NodeId(state.elements.len() - 1)
    }

    /// Where the last click navigated, if anywhere.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.lock().location.clone()
    }

    /// The `class` attribute as the browser would render it.
    #[must_use]
    pub fn class_name(&self, node: NodeId) -> Option<String> {
        self.with_element(node, |element| element.classes.join(" "))
    }

    #[must_use]
    pub fn handler_count(&self, node: NodeId) -> usize {
        self.with_element(node, |element| element.handlers.len()).unwrap_or_default()
    }

    /// Dispatch a click: run bound handlers in order, then apply any requested
    /// navigation. Returns the event as the handlers left it.
    pub fn click(&self, node: NodeId) -> ClickEvent {
        let handlers = self.with_element(node, |element| element.handlers.clone()).unwrap_or_default();

        let mut event = ClickEvent::new(node);
        for handler in &handlers {
            handler(&mut event);
        }

        if let Some(url) = event.navigation() {
            tracing::debug!(%url, "document navigated");
            self.lock().location = Some(url.to_owned());
        }
        event
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element<T>(&self, node: NodeId, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.lock().elements.get(node.0).map(f)
    }

    fn with_element_mut(&self, node: NodeId, f: impl FnOnce(&mut Element)) {
        if let Some(element) = self.lock().elements.get_mut(node.0) {
            f(element);
        }
    }
}

impl Dom for MemoryDocument {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.lock()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.matches(selector))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.with_element(node, |element| element.tag.clone())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("class") {
            return self.class_name(node);
        }
        self.with_element(node, |element| element.attr(name).map(str::to_owned)).flatten()
    }

    fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.with_element_mut(node, |element| element.set_attr(name, value));
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_element(node, |element| element.classes.iter().any(|c| c == class)).unwrap_or_default()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        self.with_element_mut(node, |element| element.add_class(class));
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        self.with_element_mut(node, |element| element.remove_class(class));
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.with_element(node, |element| element.text.clone())
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.with_element_mut(node, |element| text.clone_into(&mut element.text));
    }

    fn off_click(&self, node: NodeId) {
        self.with_element_mut(node, |element| element.handlers.clear());
    }

    fn on_click(&self, node: NodeId, handler: ClickHandler) {
        self.with_element_mut(node, |element| element.handlers.push(handler));
    }
}
