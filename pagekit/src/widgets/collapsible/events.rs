use std::sync::Arc;

use log::{trace, warn};
use pagedom::DomEvent;
use tokio::runtime::Handle;

use super::Collapsible;
use crate::Result;

impl Collapsible {
    /// Register the delegated listener on the host. It holds a weak
    /// reference so an abandoned widget does not stay alive through it.
    pub(super) fn bind(&self) -> Result<()> {
        let weak = Arc::downgrade(&self.inner);
        let listener = self.inner.document.add_listener(
            self.inner.host,
            &self.inner.config.event,
            move |event: &DomEvent| {
                if let Some(inner) = weak.upgrade() {
                    Collapsible { inner }.activate(event);
                }
            },
        )?;
        self.state().listener = Some(listener);
        Ok(())
    }

    fn activate(&self, event: &DomEvent) {
        let Some(title) = self.inner.document.closest(event.target, &self.inner.titles) else {
            return;
        };
        let Some(index) = self.state().position(title) else {
            return;
        };
        trace!("{} on title {index} of {:?}", event.kind, self.inner.host);

        match Handle::try_current() {
            Ok(handle) => {
                let this = self.clone();
                handle.spawn(async move {
                    if let Err(e) = this.toggle(index).await {
                        warn!("toggle of item {index} failed: {e}");
                    }
                });
            }
            Err(_) => {
                if let Err(e) = self.toggle_now(index) {
                    warn!("toggle of item {index} failed: {e}");
                }
            }
        }
    }
}
