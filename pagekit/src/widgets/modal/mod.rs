//! Dialog overlay with an animated open/close lifecycle.

mod config;
mod events;
mod render;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use log::{debug, warn};
use pagedom::{Document, ListenerId, NodeId, TransitionProperty};

pub use self::config::{
    ActionCallback, ActionKind, ModalAction, ModalClassOptions, ModalClasses, ModalConfig,
    ModalOptions,
};
pub use self::render::{ACTION_ATTR, ModalElements, TYPE_ATTR};
use crate::emitter::{Emits, EventEmitter};
use crate::transition::TransitionWatch;
use crate::{Error, Result, WidgetDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Events published by a [`Modal`]; the payload is the event itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalEvent {
    Open,
    Close,
    Cancel,
    Confirm,
}

impl ModalEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Cancel => "cancel",
            Self::Confirm => "confirm",
        }
    }
}

impl fmt::Display for ModalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Transition = Shared<BoxFuture<'static, Result<()>>>;

struct Lifecycle {
    state: ModalState,
    in_flight: Option<Transition>,
    generation: u64,
    listener: Option<ListenerId>,
    destroyed: bool,
}

struct Inner {
    document: Document,
    mount: NodeId,
    config: ModalConfig,
    elements: ModalElements,
    emitter: EventEmitter<ModalEvent>,
    lifecycle: Mutex<Lifecycle>,
}

/// Handle to a modal. Clones share the same dialog.
#[derive(Clone)]
pub struct Modal {
    inner: Arc<Inner>,
}

impl Modal {
    pub fn new(document: &Document, options: &ModalOptions) -> Result<Self> {
        Self::with_config(document, ModalConfig::default().merged(options))
    }

    /// Build from the process defaults patched with `options`.
    pub fn with_defaults(
        document: &Document,
        defaults: &WidgetDefaults,
        options: &ModalOptions,
    ) -> Result<Self> {
        Self::with_config(document, defaults.modal.merged(options))
    }

    /// Render the dialog detached; it is mounted by [`open`](Self::open).
    pub fn with_config(document: &Document, config: ModalConfig) -> Result<Self> {
        let classes = &config.classes;
        if config.animation && (classes.enter.trim().is_empty() || classes.leave.trim().is_empty()) {
            return Err(Error::Configuration(
                "animation needs both an enter and a leave class".into(),
            ));
        }
        if config.event.trim().is_empty() {
            return Err(Error::Configuration("event type must not be empty".into()));
        }
        let mount = config.host.unwrap_or_else(|| document.body());
        if !document.exists(mount) {
            return Err(Error::MissingElement(format!("modal host {mount:?}")));
        }

        let elements = render::render(document, &config)?;
        let modal = Self {
            inner: Arc::new(Inner {
                document: document.clone(),
                mount,
                config,
                elements,
                emitter: EventEmitter::new(),
                lifecycle: Mutex::new(Lifecycle {
                    state: ModalState::Closed,
                    in_flight: None,
                    generation: 0,
                    listener: None,
                    destroyed: false,
                }),
            }),
        };
        if let Err(e) = modal.bind() {
            let _ = document.remove(elements.root);
            return Err(e);
        }
        debug!("modal {:?} rendered for {mount:?}", elements.root);
        Ok(modal)
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.inner.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> ModalState {
        self.lifecycle().state
    }

    pub fn is_open(&self) -> bool {
        self.state() == ModalState::Open
    }

    pub fn elements(&self) -> &ModalElements {
        &self.inner.elements
    }

    pub fn config(&self) -> &ModalConfig {
        &self.inner.config
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle().destroyed
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mount and show the dialog, resolving once the enter animation ends.
    /// Unless the modal is closed this resolves with the running transition.
    pub async fn open(&self) -> Result<()> {
        self.transition(ModalState::Closed, ModalState::Opening).await
    }

    /// Hide and unmount the dialog, resolving once the leave animation ends.
    /// Unless the modal is open this resolves with the running transition.
    pub async fn close(&self) -> Result<()> {
        self.transition(ModalState::Open, ModalState::Closing).await
    }

    /// Schedule [`close`](Self::close) from synchronous code such as event
    /// listeners. A modal that is still opening closes once it is open.
    /// Without a runtime the modal closes immediately.
    pub fn dismiss(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let this = self.clone();
                handle.spawn(async move {
                    if let Err(e) = this.take_down().await {
                        warn!("closing modal failed: {e}");
                    }
                });
            }
            Err(_) => {
                if let Err(e) = self.close_now() {
                    warn!("closing modal failed: {e}");
                }
            }
        }
    }

    /// [`close`](Self::close), letting a running open finish first.
    async fn take_down(&self) -> Result<()> {
        if self.state() == ModalState::Opening {
            self.open().await?;
        }
        self.close().await
    }

    async fn transition(&self, from: ModalState, phase: ModalState) -> Result<()> {
        let transition = {
            let mut lifecycle = self.lifecycle();
            if lifecycle.destroyed {
                return Err(Error::Destroyed);
            }
            if lifecycle.state == from {
                lifecycle.state = phase;
                lifecycle.generation += 1;
                let generation = lifecycle.generation;
                let this = self.clone();
                let transition = async move { this.run(phase, generation).await }
                    .boxed()
                    .shared();
                lifecycle.in_flight = Some(transition.clone());
                transition
            } else {
                match &lifecycle.in_flight {
                    Some(transition) => transition.clone(),
                    None => return Ok(()),
                }
            }
        };
        transition.await
    }

    async fn run(&self, phase: ModalState, generation: u64) -> Result<()> {
        let opening = phase == ModalState::Opening;
        let outcome = if opening {
            self.animate_open().await
        } else {
            self.animate_close(generation).await
        };

        let current = {
            let mut lifecycle = self.lifecycle();
            if lifecycle.destroyed {
                return Err(Error::Destroyed);
            }
            let current = lifecycle.generation == generation;
            if current {
                lifecycle.in_flight = None;
                lifecycle.state = match (opening, outcome.is_ok()) {
                    (true, true) | (false, false) => ModalState::Open,
                    (true, false) | (false, true) => ModalState::Closed,
                };
            }
            current
        };
        outcome?;
        if current {
            self.emit(if opening { ModalEvent::Open } else { ModalEvent::Close });
        }
        Ok(())
    }

    async fn animate_open(&self) -> Result<()> {
        let document = &self.inner.document;
        let root = self.inner.elements.root;
        let classes = &self.inner.config.classes;

        document.append_child(self.inner.mount, root)?;
        if self.inner.config.animation {
            document.remove_class(root, &classes.leave)?;
            document.add_class(root, &classes.enter)?;
            TransitionWatch::new(document, root, TransitionProperty::Opacity)?
                .settle()
                .await;
        }
        Ok(())
    }

    async fn animate_close(&self, generation: u64) -> Result<()> {
        let document = &self.inner.document;
        let root = self.inner.elements.root;
        let classes = &self.inner.config.classes;

        if self.inner.config.animation {
            document.remove_class(root, &classes.enter)?;
            document.add_class(root, &classes.leave)?;
            TransitionWatch::new(document, root, TransitionProperty::Opacity)?
                .settle()
                .await;
            if self.lifecycle().generation != generation {
                return Ok(());
            }
        }
        document.detach(root)?;
        if self.inner.config.animation {
            document.remove_class(root, &classes.leave)?;
        }
        Ok(())
    }

    /// Mount and show without animation, superseding a running transition.
    pub fn open_now(&self) -> Result<()> {
        self.settle_now(ModalState::Open)
    }

    /// Unmount without animation, superseding a running transition.
    pub fn close_now(&self) -> Result<()> {
        self.settle_now(ModalState::Closed)
    }

    fn settle_now(&self, target: ModalState) -> Result<()> {
        {
            let mut lifecycle = self.lifecycle();
            if lifecycle.destroyed {
                return Err(Error::Destroyed);
            }
            if lifecycle.state == target {
                return Ok(());
            }
            lifecycle.generation += 1;
            lifecycle.in_flight = None;
            lifecycle.state = target;
        }

        let document = &self.inner.document;
        let root = self.inner.elements.root;
        let classes = &self.inner.config.classes;
        let animation = self.inner.config.animation;
        if target == ModalState::Open {
            document.append_child(self.inner.mount, root)?;
            if animation {
                document.remove_class(root, &classes.leave)?;
                document.add_class(root, &classes.enter)?;
            }
            self.emit(ModalEvent::Open);
        } else {
            document.detach(root)?;
            if animation {
                document.remove_class(root, &classes.enter)?;
                document.remove_class(root, &classes.leave)?;
            }
            self.emit(ModalEvent::Close);
        }
        Ok(())
    }

    /// Remove the dialog and its listeners at once, whatever the state.
    /// Nothing is emitted.
    pub fn destroy(&self) {
        let listener = {
            let mut lifecycle = self.lifecycle();
            if lifecycle.destroyed {
                return;
            }
            lifecycle.destroyed = true;
            lifecycle.generation += 1;
            lifecycle.in_flight = None;
            lifecycle.state = ModalState::Closed;
            lifecycle.listener.take()
        };
        if let Some(listener) = listener {
            self.inner.document.remove_listener(listener);
        }
        let _ = self.inner.document.remove(self.inner.elements.root);
        self.inner.emitter.remove_all_listeners();
        debug!("modal {:?} destroyed", self.inner.elements.root);
    }

    fn emit(&self, event: ModalEvent) {
        debug!("modal {:?}: {event}", self.inner.elements.root);
        self.inner.emitter.emit(event.as_str(), &event);
    }
}

impl Emits for Modal {
    type Payload = ModalEvent;

    fn emitter(&self) -> &EventEmitter<ModalEvent> {
        &self.inner.emitter
    }
}

impl fmt::Debug for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("root", &self.inner.elements.root)
            .field("mount", &self.inner.mount)
            .field("state", &self.state())
            .finish()
    }
}
