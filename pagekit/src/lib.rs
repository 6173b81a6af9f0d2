//! Collapsible sections and modal dialogs on top of a [`pagedom::Document`].
//!
//! Widgets bind a single delegated listener to their root element, keep
//! their state behind a shared handle and publish what happened through an
//! [`EventEmitter`]. Animated operations are `async` and resolve when the
//! element's CSS-style transition reports completion, or when a timeout
//! derived from the declared duration runs out.

pub mod config;
pub mod emitter;
pub mod error;
pub mod transition;
pub mod widgets;

pub use config::WidgetDefaults;
pub use emitter::{Emits, EventEmitter, HandlerId, WILDCARD};
pub use error::{Error, Result};
pub use widgets::{
    Collapsible, CollapsibleConfig, CollapsibleOptions, CollapsibleSnapshot, Modal, ModalAction,
    ModalConfig, ModalEvent, ModalOptions, ModalState,
};

pub mod prelude {
    pub use crate::widgets::collapsible::{COLLAPSE, EXPAND};
    pub use crate::{
        Collapsible, CollapsibleOptions, CollapsibleSnapshot, Emits, Error, Modal, ModalAction,
        ModalEvent, ModalOptions, ModalState, Result, WidgetDefaults,
    };
    pub use pagedom::{Document, Element, NodeId};
}
