use std::sync::{Arc, Mutex};

use pagedom::{Document, DomEvent, Element, Navigation};

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&DomEvent) + Send + Sync>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let make = move |label: &str| -> Box<dyn Fn(&DomEvent) + Send + Sync> {
        let sink = Arc::clone(&sink);
        let label = label.to_string();
        Box::new(move |_event: &DomEvent| sink.lock().unwrap().push(label.clone()))
    };
    (log, make)
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_click_bubbles_from_target_to_body() {
    let doc = Document::new();
    let outer = doc.insert(doc.body(), Element::div()).unwrap();
    let inner = doc.insert(outer, Element::new("button")).unwrap();
    let (log, make) = recorder();

    doc.add_listener(doc.body(), "click", make("body")).unwrap();
    doc.add_listener(outer, "click", make("outer")).unwrap();
    doc.add_listener(inner, "click", make("inner-1")).unwrap();
    doc.add_listener(inner, "click", make("inner-2")).unwrap();

    assert!(doc.click(inner).unwrap());
    assert_eq!(*log.lock().unwrap(), vec!["inner-1", "inner-2", "outer", "body"]);
}

#[test]
fn test_listeners_filter_by_kind() {
    let doc = Document::new();
    let node = doc.insert(doc.body(), Element::div()).unwrap();
    let (log, make) = recorder();

    doc.add_listener(node, "click", make("click")).unwrap();
    doc.add_listener(node, "custom", make("custom")).unwrap();

    doc.dispatch(&DomEvent::new("custom", node)).unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["custom"]);
}

#[test]
fn test_stop_propagation() {
    let doc = Document::new();
    let outer = doc.insert(doc.body(), Element::div()).unwrap();
    let inner = doc.insert(outer, Element::div()).unwrap();
    let (log, make) = recorder();

    doc.add_listener(inner, "click", |event: &DomEvent| event.stop_propagation())
        .unwrap();
    doc.add_listener(inner, "click", make("inner")).unwrap();
    doc.add_listener(outer, "click", make("outer")).unwrap();

    doc.click(inner).unwrap();
    // Listeners on the current node still run.
    assert_eq!(*log.lock().unwrap(), vec!["inner"]);
}

#[test]
fn test_remove_listener() {
    let doc = Document::new();
    let node = doc.insert(doc.body(), Element::div()).unwrap();
    let (log, make) = recorder();

    let id = doc.add_listener(node, "click", make("a")).unwrap();
    assert!(doc.remove_listener(id));
    assert!(!doc.remove_listener(id));

    doc.click(node).unwrap();
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_removing_node_drops_its_listeners() {
    let doc = Document::new();
    let outer = doc.insert(doc.body(), Element::div()).unwrap();
    let inner = doc.insert(outer, Element::div()).unwrap();
    let (_log, make) = recorder();

    doc.add_listener(outer, "click", make("outer")).unwrap();
    doc.add_listener(inner, "click", make("inner")).unwrap();
    assert_eq!(doc.listener_count(), 2);

    doc.remove(outer).unwrap();
    assert_eq!(doc.listener_count(), 0);
    assert!(!doc.exists(inner));
    assert!(doc.click(inner).is_err());
}

#[test]
fn test_listener_may_mutate_document() {
    let doc = Document::new();
    let node = doc.insert(doc.body(), Element::div()).unwrap();
    let handle = doc.clone();

    doc.add_listener(node, "click", move |event: &DomEvent| {
        handle.add_class(event.target, "clicked").unwrap();
        handle.insert(event.target, Element::new("span")).unwrap();
    })
    .unwrap();

    doc.click(node).unwrap();
    assert!(doc.has_class(node, "clicked"));
    assert_eq!(doc.children(node).len(), 1);
}

// ============================================================================
// Default Actions
// ============================================================================

#[test]
fn test_anchor_click_navigates() {
    let doc = Document::new();
    let link = doc
        .insert(
            doc.body(),
            Element::new("a")
                .attr("href", "https://example.com/search?q=")
                .attr("target", "_blank")
                .child(Element::new("span").text("search")),
        )
        .unwrap();
    let span = doc.children(link)[0];

    doc.click(span).unwrap();

    let navigations = doc.navigations();
    assert_eq!(
        navigations,
        vec![Navigation {
            href: "https://example.com/search?q=".into(),
            target: Some("_blank".into()),
        }]
    );
    assert!(navigations[0].opens_new_context());
}

#[test]
fn test_prevent_default_suppresses_navigation() {
    let doc = Document::new();
    let link = doc
        .insert(doc.body(), Element::new("a").attr("href", "/x").text("x"))
        .unwrap();
    doc.add_listener(doc.body(), "click", |event: &DomEvent| event.prevent_default())
        .unwrap();

    assert!(!doc.click(link).unwrap());
    assert!(doc.navigations().is_empty());
}

#[test]
fn test_anchor_without_href_does_not_navigate() {
    let doc = Document::new();
    let link = doc
        .insert(doc.body(), Element::new("a").attr("data-type", "close"))
        .unwrap();

    doc.click(link).unwrap();
    assert!(doc.navigations().is_empty());
}

// ============================================================================
// Tree Mutation
// ============================================================================

#[test]
fn test_append_child_moves_node() {
    let doc = Document::new();
    let a = doc.insert(doc.body(), Element::div()).unwrap();
    let b = doc.insert(doc.body(), Element::div()).unwrap();
    let child = doc.insert(a, Element::new("p")).unwrap();

    doc.append_child(b, child).unwrap();

    assert!(doc.children(a).is_empty());
    assert_eq!(doc.children(b), vec![child]);
    assert_eq!(doc.parent(child), Some(b));
}

#[test]
fn test_append_child_rejects_cycles() {
    let doc = Document::new();
    let a = doc.insert(doc.body(), Element::div()).unwrap();
    let b = doc.insert(a, Element::div()).unwrap();

    assert!(doc.append_child(b, a).is_err());
    assert!(doc.append_child(a, a).is_err());
    assert!(doc.append_child(a, doc.body()).is_err());
}

#[test]
fn test_detach_keeps_subtree() {
    let doc = Document::new();
    let a = doc.insert(doc.body(), Element::div()).unwrap();
    let b = doc.insert(a, Element::div()).unwrap();

    doc.detach(a).unwrap();

    assert!(doc.exists(a));
    assert!(!doc.is_connected(a));
    assert!(!doc.is_connected(b));
    assert!(doc.contains(a, b));

    doc.append_child(doc.body(), a).unwrap();
    assert!(doc.is_connected(b));
}

#[test]
fn test_class_list_operations() {
    let doc = Document::new();
    let node = doc.insert(doc.body(), Element::div().class("a")).unwrap();

    doc.add_class(node, "b c").unwrap();
    doc.add_class(node, "a").unwrap();
    assert_eq!(doc.classes(node), vec!["a", "b", "c"]);

    doc.remove_class(node, "a c").unwrap();
    assert_eq!(doc.attribute(node, "class").as_deref(), Some("b"));

    assert!(!doc.toggle_class(node, "b", None).unwrap());
    assert!(doc.toggle_class(node, "d", Some(true)).unwrap());
    assert!(doc.toggle_class(node, "d", Some(true)).unwrap());
    assert_eq!(doc.classes(node), vec!["d"]);
}

#[test]
fn test_remove_attribute_updates_matching() {
    let doc = Document::new();
    let node = doc
        .insert(
            doc.body(),
            Element::new("a").class("btn primary").attr("data-type", "close"),
        )
        .unwrap();
    let typed = pagedom::SelectorList::parse("[data-type]").unwrap();
    assert!(doc.matches(node, &typed));

    doc.remove_attribute(node, "data-type").unwrap();
    assert!(!doc.matches(node, &typed));
    assert_eq!(doc.attribute(node, "data-type"), None);

    doc.remove_attribute(node, "class").unwrap();
    assert!(doc.classes(node).is_empty());
    assert!(doc.remove_attribute(doc.create_text("x"), "id").is_err());
}

#[test]
fn test_set_text_replaces_children() {
    let doc = Document::new();
    let node = doc
        .insert(
            doc.body(),
            Element::new("header")
                .child(Element::new("span").text("old"))
                .text("tail"),
        )
        .unwrap();

    doc.set_text(node, "New title").unwrap();
    assert_eq!(doc.children(node).len(), 1);
    assert_eq!(doc.text_content(node), "New title");

    doc.set_text(node, "").unwrap();
    assert!(doc.children(node).is_empty());
}

#[test]
fn test_clones_share_one_tree() {
    let doc = Document::new();
    let handle = doc.clone();
    assert!(doc.ptr_eq(&handle));
    assert!(!doc.ptr_eq(&Document::new()));

    let node = handle.insert(handle.body(), Element::div()).unwrap();
    assert!(doc.exists(node));
}
