pub mod collapsible;
pub mod modal;

pub use collapsible::{Collapsible, CollapsibleConfig, CollapsibleOptions, CollapsibleSnapshot};
pub use modal::{Modal, ModalAction, ModalConfig, ModalEvent, ModalOptions, ModalState};
