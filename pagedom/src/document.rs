//! The document: a shared, mutable node arena.
//!
//! [`Document`] is a cheap handle; clones refer to the same tree. The lock is
//! released before listeners run, so listeners may freely mutate the document.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, trace};
use slotmap::SlotMap;

use crate::element::{split_classes, Child, Element, ElementData, Node, NodeId, NodeKind};
use crate::error::{DomError, Result};
use crate::event::{CLICK, DomEvent, Listener, ListenerEntry, ListenerId, Navigation};
use crate::layout;
use crate::markup::{self, escape_text, is_void};
use crate::selector::SelectorList;
use crate::stylesheet::{Rule, StyleSheet};
use crate::transitions::{TransitionConfig, TransitionProperty};
use crate::types::{ComputedStyle, Display, Height, Style};

/// A transition waiting for its `transitionend`.
#[derive(Debug, Clone, Copy)]
struct Scheduled {
    node: NodeId,
    property: TransitionProperty,
    token: u64,
    after: Duration,
}

pub(crate) struct Tree {
    pub nodes: SlotMap<NodeId, Node>,
    pub body: NodeId,
    listeners: SlotMap<ListenerId, ListenerEntry>,
    stylesheet: StyleSheet,
    navigations: Vec<Navigation>,
    next_token: u64,
}

impl Tree {
    fn new() -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let body = nodes.insert(Node::new(NodeKind::Element(ElementData::new("body"))));
        Self {
            nodes,
            body,
            listeners: SlotMap::with_key(),
            stylesheet: StyleSheet::new(),
            navigations: Vec::new(),
            next_token: 0,
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    fn element(&self, id: NodeId) -> Result<&ElementData> {
        self.node(id)?.element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        self.node_mut(id)?
            .element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// The node followed by its ancestors, nearest first.
    fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(node);
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        path
    }

    /// Preorder walk of the subtree rooted at `id`, including `id`.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if let Some(n) = self.nodes.get(node) {
                out.push(node);
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors_inclusive(id).last() == Some(&self.body)
    }

    pub fn computed(&self, id: NodeId) -> ComputedStyle {
        self.stylesheet.compute(&self.nodes, id)
    }

    /// Connected and not inside a `display: none` subtree.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let path = self.ancestors_inclusive(id);
        path.last() == Some(&self.body)
            && path.iter().all(|node| {
                self.nodes[*node].element().is_none() || self.computed(*node).display != Display::None
            })
    }

    fn build(&mut self, child: &Child) -> NodeId {
        match child {
            Child::Text(text) => self.nodes.insert(Node::new(NodeKind::Text(text.clone()))),
            Child::Element(element) => {
                let mut data = ElementData::new(element.tag.clone());
                if let Some(id) = &element.id {
                    data.attributes.insert("id".to_string(), id.clone());
                }
                for (name, value) in &element.attributes {
                    data.set_attribute(name, value);
                }
                for class in &element.classes {
                    if !data.has_class(class) {
                        data.classes.push(class.clone());
                    }
                }
                data.style = element.style.clone();
                data.height = element.height;

                let id = self.nodes.insert(Node::new(NodeKind::Element(data)));
                for grandchild in &element.children {
                    let child_id = self.build(grandchild);
                    self.link(id, child_id);
                }
                id
            }
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes.get_mut(child).and_then(|n| n.parent.take())
            && let Some(p) = self.nodes.get_mut(parent)
        {
            p.children.retain(|c| *c != child);
        }
    }

    fn delete_subtree(&mut self, id: NodeId) {
        self.unlink(id);
        for node in self.subtree(id) {
            if let Some(removed) = self.nodes.remove(node) {
                for listener in removed.listeners {
                    self.listeners.remove(listener);
                }
            }
        }
    }

    fn clear_children(&mut self, id: NodeId) {
        let children = self.nodes.get(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.delete_subtree(child);
        }
    }

    /// Re-run the cascade for a subtree and report opacity transitions.
    ///
    /// With `animate` unset the new values are adopted silently, as for
    /// freshly inserted nodes.
    fn restyle(&mut self, root: NodeId, animate: bool) -> Vec<Scheduled> {
        let mut scheduled = Vec::new();
        for node in self.subtree(root) {
            if self.nodes[node].element().is_none() {
                continue;
            }
            let computed = self.computed(node);
            let previous = self.nodes[node].opacity;
            if (computed.opacity - previous).abs() <= f32::EPSILON {
                continue;
            }
            self.nodes[node].opacity = computed.opacity;

            if animate
                && let Some(config) = computed.transitions.opacity
                && !config.total().is_zero()
                && self.is_rendered(node)
            {
                scheduled.push(self.schedule(node, TransitionProperty::Opacity, config));
            }
        }
        scheduled
    }

    fn schedule(
        &mut self,
        node: NodeId,
        property: TransitionProperty,
        config: TransitionConfig,
    ) -> Scheduled {
        self.next_token += 1;
        let token = self.next_token;
        self.nodes[node].pending.insert(property, token);
        Scheduled {
            node,
            property,
            token,
            after: config.total(),
        }
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(data) => {
                out.push('<');
                out.push_str(&data.tag);
                if let Some(id) = data.id() {
                    push_attribute(out, "id", id);
                }
                if let Some(class) = data.attribute("class") {
                    push_attribute(out, "class", &class);
                }
                for (name, value) in data.attributes.iter().filter(|(name, _)| *name != "id") {
                    push_attribute(out, name, value);
                }
                if let Height::Px(px) = data.height {
                    push_attribute(out, "style", &format!("height: {px}px"));
                }
                out.push('>');
                if is_void(&data.tag) {
                    return;
                }
                for child in &node.children {
                    self.serialize(*child, out);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
        }
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_text(value));
    out.push('"');
}

/// Shared handle to a document tree rooted at a `body` element.
#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree();
        f.debug_struct("Document")
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tree::new())),
        }
    }

    pub(crate) fn tree(&self) -> MutexGuard<'_, Tree> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether both handles refer to the same tree.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn body(&self) -> NodeId {
        self.tree().body
    }

    // -------------------------------------------------------------------------
    // Tree structure
    // -------------------------------------------------------------------------

    /// Create a detached subtree from an element description.
    pub fn create(&self, element: Element) -> NodeId {
        let mut tree = self.tree();
        let id = tree.build(&Child::Element(element));
        tree.restyle(id, false);
        id
    }

    pub fn create_text(&self, text: impl Into<String>) -> NodeId {
        self.tree().build(&Child::Text(text.into()))
    }

    /// Create `element` and append it to `parent`.
    pub fn insert(&self, parent: NodeId, element: Element) -> Result<NodeId> {
        let id = self.create(element);
        if let Err(e) = self.append_child(parent, id) {
            self.tree().delete_subtree(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Append `child` to `parent`, moving it from its current parent.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.tree();
        tree.element(parent)?;
        tree.node(child)?;
        if child == tree.body {
            return Err(DomError::HierarchyRequest("the body cannot be moved".into()));
        }
        if tree.ancestors_inclusive(parent).contains(&child) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be appended to itself or its descendants".into(),
            ));
        }

        tree.unlink(child);
        tree.link(parent, child);
        tree.restyle(child, false);
        trace!("appended {child:?} to {parent:?}");
        Ok(())
    }

    /// Detach a node from its parent, keeping the subtree and its listeners.
    pub fn detach(&self, node: NodeId) -> Result<()> {
        let mut tree = self.tree();
        tree.node(node)?;
        if node == tree.body {
            return Err(DomError::HierarchyRequest("the body cannot be detached".into()));
        }
        tree.unlink(node);
        Ok(())
    }

    /// Delete a node, its descendants and every listener attached to them.
    pub fn remove(&self, node: NodeId) -> Result<()> {
        let mut tree = self.tree();
        tree.node(node)?;
        if node == tree.body {
            return Err(DomError::HierarchyRequest("the body cannot be removed".into()));
        }
        tree.delete_subtree(node);
        Ok(())
    }

    pub fn exists(&self, node: NodeId) -> bool {
        self.tree().nodes.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.tree().nodes.len()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree()
            .nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree().ancestors_inclusive(node).contains(&ancestor)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree().is_connected(node)
    }

    pub fn is_rendered(&self, node: NodeId) -> bool {
        self.tree().is_rendered(node)
    }

    // -------------------------------------------------------------------------
    // Element data
    // -------------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree().element(node).ok().map(|e| e.tag.clone())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree().element(node).ok().and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let scheduled = {
            let mut tree = self.tree();
            tree.element_mut(node)?.set_attribute(name, value);
            tree.restyle(node, true)
        };
        self.start_transitions(scheduled);
        Ok(())
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Result<()> {
        let scheduled = {
            let mut tree = self.tree();
            let element = tree.element_mut(node)?;
            if name == "class" {
                element.classes.clear();
            } else {
                element.attributes.remove(name);
            }
            tree.restyle(node, true)
        };
        self.start_transitions(scheduled);
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree()
            .element(node)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree()
            .element(node)
            .is_ok_and(|e| e.has_class(class))
    }

    /// Add every whitespace-separated class in `class`.
    pub fn add_class(&self, node: NodeId, class: &str) -> Result<()> {
        self.update_classes(node, |classes| {
            for name in split_classes(class) {
                if !classes.contains(&name) {
                    classes.push(name);
                }
            }
        })
    }

    /// Remove every whitespace-separated class in `class`.
    pub fn remove_class(&self, node: NodeId, class: &str) -> Result<()> {
        let names = split_classes(class);
        self.update_classes(node, |classes| classes.retain(|c| !names.contains(c)))
    }

    /// Toggle a single class; `force` pins the outcome. Returns whether the
    /// class is present afterwards.
    pub fn toggle_class(&self, node: NodeId, class: &str, force: Option<bool>) -> Result<bool> {
        let present = force.unwrap_or_else(|| !self.has_class(node, class));
        if present {
            self.add_class(node, class)?;
        } else {
            self.remove_class(node, class)?;
        }
        Ok(present)
    }

    fn update_classes(&self, node: NodeId, f: impl FnOnce(&mut Vec<String>)) -> Result<()> {
        let scheduled = {
            let mut tree = self.tree();
            let element = tree.element_mut(node)?;
            let before = element.classes.clone();
            f(&mut element.classes);
            if element.classes == before {
                return Ok(());
            }
            tree.restyle(node, true)
        };
        self.start_transitions(scheduled);
        Ok(())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let tree = self.tree();
        tree.subtree(node)
            .into_iter()
            .filter_map(|id| match &tree.nodes[id].kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&self, node: NodeId, text: &str) -> Result<()> {
        let mut tree = self.tree();
        tree.element(node)?;
        tree.clear_children(node);
        if !text.is_empty() {
            let child = tree.build(&Child::Text(text.to_string()));
            tree.link(node, child);
        }
        Ok(())
    }

    /// Parse `markup` and replace all children with the result.
    pub fn set_inner_markup(&self, node: NodeId, markup: &str) -> Result<()> {
        let fragment = markup::parse_fragment(markup)?;
        let mut tree = self.tree();
        tree.element(node)?;
        tree.clear_children(node);
        for child in &fragment {
            let id = tree.build(child);
            tree.link(node, id);
        }
        tree.restyle(node, false);
        Ok(())
    }

    /// Serialize a node and its subtree.
    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree().serialize(node, &mut out);
        out
    }

    /// Serialize the children of a node.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let tree = self.tree();
        let mut out = String::new();
        if let Some(n) = tree.nodes.get(node) {
            for child in &n.children {
                tree.serialize(*child, &mut out);
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Style and layout
    // -------------------------------------------------------------------------

    /// Append a stylesheet rule. Existing nodes adopt it without transitions.
    pub fn add_rule(&self, selector: &str, style: Style) -> Result<()> {
        let selector = SelectorList::parse(selector)?;
        let mut tree = self.tree();
        tree.stylesheet.push(Rule { selector, style });
        let body = tree.body;
        tree.restyle(body, false);
        Ok(())
    }

    pub fn style(&self, node: NodeId) -> Option<Style> {
        self.tree().element(node).ok().map(|e| e.style.clone())
    }

    /// Replace the inline style.
    pub fn set_style(&self, node: NodeId, style: Style) -> Result<()> {
        let scheduled = {
            let mut tree = self.tree();
            tree.element_mut(node)?.style = style;
            tree.restyle(node, true)
        };
        self.start_transitions(scheduled);
        Ok(())
    }

    pub fn computed_style(&self, node: NodeId) -> Result<ComputedStyle> {
        let tree = self.tree();
        tree.element(node)?;
        Ok(tree.computed(node))
    }

    /// Computed transition of one property, if any.
    pub fn transition(&self, node: NodeId, property: TransitionProperty) -> Option<TransitionConfig> {
        self.computed_style(node)
            .ok()
            .and_then(|style| style.transitions.get(property))
    }

    pub fn height(&self, node: NodeId) -> Height {
        self.tree()
            .element(node)
            .map(|e| e.height)
            .unwrap_or_default()
    }

    /// Set the inline height. Changes between two pixel values of a rendered
    /// node with a height transition end in a `transitionend` event.
    pub fn set_height(&self, node: NodeId, height: Height) -> Result<()> {
        let scheduled = {
            let mut tree = self.tree();
            let element = tree.element_mut(node)?;
            let previous = std::mem::replace(&mut element.height, height);

            match (previous, height) {
                (Height::Px(from), Height::Px(to)) if from != to => {
                    let config = tree.computed(node).transitions.height;
                    match config {
                        Some(config) if !config.total().is_zero() && tree.is_rendered(node) => {
                            Some(tree.schedule(node, TransitionProperty::Height, config))
                        }
                        _ => None,
                    }
                }
                _ => None,
            }
        };
        self.start_transitions(scheduled.into_iter().collect());
        Ok(())
    }

    /// Rendered height: zero when not rendered, the inline height when set,
    /// the content height otherwise.
    pub fn offset_height(&self, node: NodeId) -> u32 {
        layout::offset_height(&self.tree(), node)
    }

    /// Height of the content regardless of the inline height.
    pub fn scroll_height(&self, node: NodeId) -> u32 {
        layout::scroll_height(&self.tree(), node)
    }

    // -------------------------------------------------------------------------
    // Selectors
    // -------------------------------------------------------------------------

    /// First descendant of `scope` matching `selector`, in document order.
    pub fn select(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let tree = self.tree();
        tree.subtree(scope)
            .into_iter()
            .skip(1)
            .find(|node| selector.matches(&tree.nodes, *node))
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn select_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        let tree = self.tree();
        tree.subtree(scope)
            .into_iter()
            .skip(1)
            .filter(|node| selector.matches(&tree.nodes, *node))
            .collect()
    }

    pub fn query(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.select(scope, &SelectorList::parse(selector)?))
    }

    pub fn query_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        Ok(self.select_all(scope, &SelectorList::parse(selector)?))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let tree = self.tree();
        tree.ancestors_inclusive(node)
            .into_iter()
            .find(|id| selector.matches(&tree.nodes, *id))
    }

    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        selector.matches(&self.tree().nodes, node)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Register a listener for `kind` events reaching `node`.
    pub fn add_listener<F>(&self, node: NodeId, kind: &str, callback: F) -> Result<ListenerId>
    where
        F: Fn(&DomEvent) + Send + Sync + 'static,
    {
        let mut tree = self.tree();
        tree.node(node)?;
        let id = tree.listeners.insert(ListenerEntry {
            node,
            kind: kind.to_string(),
            callback: Arc::new(callback),
        });
        tree.nodes[node].listeners.push(id);
        Ok(id)
    }

    /// Returns false if the listener was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut tree = self.tree();
        let Some(entry) = tree.listeners.remove(id) else {
            return false;
        };
        if let Some(node) = tree.nodes.get_mut(entry.node) {
            node.listeners.retain(|l| *l != id);
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.tree().listeners.len()
    }

    /// Deliver `event` to its target and then to each ancestor, running the
    /// default action afterwards. Returns false if the default was prevented.
    pub fn dispatch(&self, event: &DomEvent) -> Result<bool> {
        let path = {
            let tree = self.tree();
            tree.node(event.target)?;
            tree.ancestors_inclusive(event.target)
        };
        trace!("dispatch `{}` to {:?}", event.kind, event.target);

        for node in path {
            let callbacks: Vec<Listener> = {
                let tree = self.tree();
                let Some(n) = tree.nodes.get(node) else {
                    continue;
                };
                n.listeners
                    .iter()
                    .filter_map(|id| tree.listeners.get(*id))
                    .filter(|entry| entry.kind == event.kind)
                    .map(|entry| Arc::clone(&entry.callback))
                    .collect()
            };
            for callback in callbacks {
                callback(event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        if event.kind == CLICK && !event.is_default_prevented() {
            self.follow_link(event.target);
        }
        Ok(!event.is_default_prevented())
    }

    /// Dispatch a click on `node`.
    pub fn click(&self, node: NodeId) -> Result<bool> {
        self.dispatch(&DomEvent::click(node))
    }

    /// Navigations performed by anchor clicks, oldest first.
    pub fn navigations(&self) -> Vec<Navigation> {
        self.tree().navigations.clone()
    }

    fn follow_link(&self, target: NodeId) {
        let mut tree = self.tree();
        let anchor = tree.ancestors_inclusive(target).into_iter().find_map(|id| {
            let element = tree.nodes.get(id)?.element()?;
            let href = element.attributes.get("href")?;
            (element.tag == "a").then(|| Navigation {
                href: href.clone(),
                target: element.attributes.get("target").cloned(),
            })
        });
        if let Some(navigation) = anchor {
            info!("navigate to {} (target: {:?})", navigation.href, navigation.target);
            tree.navigations.push(navigation);
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn start_transitions(&self, scheduled: Vec<Scheduled>) {
        if scheduled.is_empty() {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, {} transition(s) will not report completion", scheduled.len());
            return;
        };
        for transition in scheduled {
            trace!(
                "{} transition on {:?} ends in {:?}",
                transition.property, transition.node, transition.after
            );
            let document = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(transition.after).await;
                document.finish_transition(transition);
            });
        }
    }

    fn finish_transition(&self, transition: Scheduled) {
        let fire = {
            let mut tree = self.tree();
            let Some(node) = tree.nodes.get_mut(transition.node) else {
                return;
            };
            if node.pending.get(&transition.property) != Some(&transition.token) {
                // Superseded by a newer change of the same property.
                return;
            }
            node.pending.remove(&transition.property);
            tree.is_rendered(transition.node)
        };
        if fire {
            let event = DomEvent::transition_end(transition.node, transition.property);
            let _ = self.dispatch(&event);
        }
    }

    /// Whether a transition of `property` on `node` is still running.
    pub fn is_transitioning(&self, node: NodeId, property: TransitionProperty) -> bool {
        self.tree()
            .nodes
            .get(node)
            .is_some_and(|n| n.pending.contains_key(&property))
    }
}
