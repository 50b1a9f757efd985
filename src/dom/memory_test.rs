use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn selector(raw: &str) -> Selector {
    Selector::parse(raw).expect("valid selector")
}

#[test]
fn query_returns_matches_in_insertion_order() {
    let doc = MemoryDocument::new();
    let first = doc.insert(Element::new("a").with_attr("data-route", "home"));
    doc.insert(Element::new("span"));
    let third = doc.insert(Element::new("FORM").with_attr("data-route", "save"));

    assert_eq!(doc.query_all(&selector("[data-route]")), [first, third]);
    assert_eq!(doc.tag_name(third).as_deref(), Some("form"));
}

#[test]
fn class_attribute_and_class_list_stay_in_sync() {
    let doc = MemoryDocument::new();
    let node = doc.insert(Element::new("div").with_id("status").with_class("alert d-none"));

    doc.remove_class(node, "d-none alert-info");
    doc.add_class(node, "alert-success");
    assert_eq!(doc.attr(node, "class").as_deref(), Some("alert alert-success"));

    doc.set_attr(node, "class", "x  y");
    assert!(doc.has_class(node, "x"));
    assert!(!doc.has_class(node, "alert"));
}

#[test]
fn class_attribute_selectors_see_the_class_list() {
    let doc = MemoryDocument::new();
    let styled = doc.insert(Element::new("a").with_class("btn primary"));
    doc.insert(Element::new("a"));

    assert_eq!(doc.query_all(&selector("[class]")), [styled]);
    assert_eq!(doc.query_all(&selector(r#"a[class="btn primary"]"#)), [styled]);
    assert!(doc.query_all(&selector("[class=btn]")).is_empty());
}

#[test]
fn set_attr_overwrites_in_place() {
    let doc = MemoryDocument::new();
    let node = doc.insert(Element::new("a").with_attr("href", "#"));
    doc.set_attr(node, "HREF", "/home");
    assert_eq!(doc.attr(node, "href").as_deref(), Some("/home"));
}

#[test]
fn set_visible_toggles_hidden_class() {
    let doc = MemoryDocument::new();
    let node = doc.insert(Element::new("button"));
    doc.set_visible(node, false);
    assert!(doc.has_class(node, "d-none"));
    doc.set_visible(node, true);
    assert!(!doc.has_class(node, "d-none"));
}

#[test]
fn click_runs_handlers_and_applies_navigation() {
    let doc = MemoryDocument::new();
    let node = doc.insert(Element::new("button"));
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    doc.on_click(
        node,
        Arc::new(move |event: &mut ClickEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
            event.prevent_default();
            event.navigate("/logout");
        }),
    );

    let event = doc.click(node);
    assert!(event.default_prevented());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(doc.location().as_deref(), Some("/logout"));
}

#[test]
fn off_click_removes_every_handler() {
    let doc = MemoryDocument::new();
    let node = doc.insert(Element::new("button"));
    doc.on_click(node, Arc::new(|event: &mut ClickEvent| event.navigate("/a")));
    doc.on_click(node, Arc::new(|event: &mut ClickEvent| event.navigate("/b")));
    assert_eq!(doc.handler_count(node), 2);

    doc.off_click(node);
    assert_eq!(doc.handler_count(node), 0);
    assert!(!doc.click(node).default_prevented());
    assert_eq!(doc.location(), None);
}

#[test]
fn handlers_may_mutate_the_document() {
    let doc = Arc::new(MemoryDocument::new());
    let node = doc.insert(Element::new("button"));
    let inner = doc.clone();
    doc.on_click(node, Arc::new(move |event: &mut ClickEvent| inner.set_text(event.target, "clicked")));

    doc.click(node);
    assert_eq!(doc.text(node).as_deref(), Some("clicked"));
}

#[test]
fn unknown_nodes_are_ignored() {
    let doc = MemoryDocument::new();
    let ghost = NodeId(42);
    doc.set_attr(ghost, "href", "/x");
    assert_eq!(doc.attr(ghost, "href"), None);
    assert_eq!(doc.tag_name(ghost), None);
    assert_eq!(doc.handler_count(ghost), 0);
}
