pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod layout;
pub mod markup;
pub mod selector;
pub mod stylesheet;
pub mod transitions;
pub mod types;

pub use document::Document;
pub use element::{Element, NodeId};
pub use error::{DomError, Result};
pub use event::{DomEvent, Listener, ListenerId, Navigation};
pub use layout::LINE_HEIGHT;
pub use selector::SelectorList;
pub use transitions::{TransitionConfig, TransitionProperty, Transitions};
pub use types::*;
