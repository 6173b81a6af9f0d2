//! Named-event publish/subscribe used by the widgets.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Event type that receives every emission, after the type-specific handlers.
pub const WILDCARD: &str = "*";

pub type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Identifies one registration made with [`EventEmitter::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Ordered handler lists keyed by event type.
///
/// Handlers are snapshotted before they are invoked, so a handler may
/// subscribe or unsubscribe freely; the change applies to the next emission.
pub struct EventEmitter<A> {
    handlers: Mutex<HashMap<String, Vec<(HandlerId, Handler<A>)>>>,
    next_id: AtomicU64,
}

impl<A> EventEmitter<A> {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn handlers(&self) -> MutexGuard<'_, HashMap<String, Vec<(HandlerId, Handler<A>)>>> {
        self.handlers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `handler` for `kind`. Registering the same closure twice
    /// yields two independent registrations.
    pub fn on<F>(&self, kind: &str, handler: F) -> HandlerId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers()
            .entry(kind.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Returns false if nothing was registered under `kind` with `id`.
    pub fn off(&self, kind: &str, id: HandlerId) -> bool {
        let mut handlers = self.handlers();
        let Some(list) = handlers.get_mut(kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(kind);
        }
        removed
    }

    pub fn remove_all_listeners(&self) {
        self.handlers().clear();
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.handlers().get(kind).map_or(0, Vec::len)
    }

    /// Invoke the handlers for `kind` in registration order, then the
    /// wildcard handlers. Emitting [`WILDCARD`] itself runs those once.
    pub fn emit(&self, kind: &str, payload: &A) {
        let callbacks: Vec<Handler<A>> = {
            let handlers = self.handlers();
            let typed = handlers.get(kind).into_iter().flatten();
            let wildcard = (kind != WILDCARD)
                .then(|| handlers.get(WILDCARD))
                .flatten()
                .into_iter()
                .flatten();
            typed
                .chain(wildcard)
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        for callback in callbacks {
            callback(payload);
        }
    }
}

impl<A> Default for EventEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .handlers()
            .iter()
            .map(|(kind, list)| (kind.clone(), list.len()))
            .collect();
        f.debug_struct("EventEmitter").field("handlers", &counts).finish()
    }
}

/// Implemented by widgets that publish events through an [`EventEmitter`].
pub trait Emits {
    type Payload;

    fn emitter(&self) -> &EventEmitter<Self::Payload>;

    fn on<F>(&self, kind: &str, handler: F) -> HandlerId
    where
        F: Fn(&Self::Payload) + Send + Sync + 'static,
    {
        self.emitter().on(kind, handler)
    }

    fn off(&self, kind: &str, id: HandlerId) -> bool {
        self.emitter().off(kind, id)
    }

    fn remove_all_listeners(&self) {
        self.emitter().remove_all_listeners()
    }
}
