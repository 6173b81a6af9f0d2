//! Process-wide widget defaults.

use log::debug;

use crate::widgets::collapsible::{CollapsibleConfig, CollapsibleOptions};
use crate::widgets::modal::{ModalConfig, ModalOptions};

/// Defaults that constructors merge per-instance options into.
///
/// Create one at startup, adjust it with the `configure_*` methods and pass
/// it to `with_defaults` constructors. Instances built earlier keep the
/// configuration they were built with.
#[derive(Debug, Clone, Default)]
pub struct WidgetDefaults {
    pub collapsible: CollapsibleConfig,
    pub modal: ModalConfig,
}

impl WidgetDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_collapsible(&mut self, options: &CollapsibleOptions) -> &CollapsibleConfig {
        self.collapsible = self.collapsible.merged(options);
        debug!("collapsible defaults updated: {:?}", self.collapsible);
        &self.collapsible
    }

    pub fn configure_modal(&mut self, options: &ModalOptions) -> &ModalConfig {
        self.modal = self.modal.merged(options);
        debug!("modal defaults updated: {:?}", self.modal);
        &self.modal
    }
}
