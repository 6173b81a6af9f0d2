use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use slotmap::new_key_type;

use crate::element::NodeId;
use crate::transitions::TransitionProperty;

new_key_type! {
    /// Handle returned by [`Document::add_listener`](crate::Document::add_listener).
    pub struct ListenerId;
}

/// Callback invoked for events dispatched to (or bubbling through) a node.
pub type Listener = Arc<dyn Fn(&DomEvent) + Send + Sync>;

pub const CLICK: &str = "click";
pub const TRANSITION_END: &str = "transitionend";

/// An event travelling from its target up through the ancestors.
#[derive(Debug)]
pub struct DomEvent {
    pub kind: String,
    pub target: NodeId,
    /// Set for `transitionend`.
    pub property: Option<TransitionProperty>,
    propagation_stopped: AtomicBool,
    default_prevented: AtomicBool,
}

impl DomEvent {
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            target,
            property: None,
            propagation_stopped: AtomicBool::new(false),
            default_prevented: AtomicBool::new(false),
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(CLICK, target)
    }

    pub fn transition_end(target: NodeId, property: TransitionProperty) -> Self {
        Self {
            property: Some(property),
            ..Self::new(TRANSITION_END, target)
        }
    }

    /// Stop the event from reaching further ancestors. Remaining listeners on
    /// the current node still run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.load(Ordering::SeqCst)
    }

    /// Suppress the default action (anchor navigation).
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

pub(crate) struct ListenerEntry {
    pub node: NodeId,
    pub kind: String,
    pub callback: Listener,
}

/// A navigation performed by the anchor default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    /// Browsing context name, e.g. `_blank` for a new tab.
    pub target: Option<String>,
}

impl Navigation {
    pub fn opens_new_context(&self) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| !target.is_empty() && target != "_self")
    }
}
