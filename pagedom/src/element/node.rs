use std::collections::{BTreeMap, HashMap};

use slotmap::new_key_type;

use crate::event::ListenerId;
use crate::transitions::TransitionProperty;
use crate::types::{Height, Style};

new_key_type! {
    /// Handle to a node stored in a [`Document`](crate::Document).
    pub struct NodeId;
}

/// Element payload: tag, attributes, class list and inline style.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub tag: String,
    /// Attributes other than `class`, which lives in `classes`.
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub style: Style,
    pub height: Height,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return (!self.classes.is_empty()).then(|| self.classes.join(" "));
        }
        self.attributes.get(name).cloned()
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes = split_classes(value);
        } else {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }
}

pub(crate) fn split_classes(value: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for class in value.split_whitespace() {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
    classes
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// A node in the document arena.
#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Listeners in registration order.
    pub listeners: Vec<ListenerId>,
    /// Opacity the last cascade produced, used to detect transitions.
    pub opacity: f32,
    /// Token of the newest scheduled transition per property.
    pub pending: HashMap<TransitionProperty, u64>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            opacity: 1.0,
            pending: HashMap::new(),
        }
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }
}
