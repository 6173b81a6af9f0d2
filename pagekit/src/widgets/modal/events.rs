use std::sync::{Arc, LazyLock};

use log::trace;
use pagedom::{DomEvent, NodeId, SelectorList};

use super::config::ActionKind;
use super::render::{ACTION_ATTR, TYPE_ATTR};
use super::{Modal, ModalEvent};
use crate::Result;

static TYPED: LazyLock<SelectorList> =
    LazyLock::new(|| SelectorList::parse("[data-type]").expect("static selector"));
static ACTION: LazyLock<SelectorList> =
    LazyLock::new(|| SelectorList::parse("[data-action]").expect("static selector"));

impl Modal {
    /// One delegated listener on the modal root handles the backdrop,
    /// typed elements and footer callbacks.
    pub(super) fn bind(&self) -> Result<()> {
        let weak = Arc::downgrade(&self.inner);
        let listener = self.inner.document.add_listener(
            self.inner.elements.root,
            &self.inner.config.event,
            move |event: &DomEvent| {
                if let Some(inner) = weak.upgrade() {
                    Modal { inner }.activate(event);
                }
            },
        )?;
        self.lifecycle().listener = Some(listener);
        Ok(())
    }

    fn activate(&self, event: &DomEvent) {
        let elements = &self.inner.elements;
        if event.target == elements.backdrop {
            if self.inner.config.autoclose {
                trace!("backdrop {} on modal {:?}", event.kind, elements.root);
                self.dismiss();
            }
            return;
        }

        if let Some(node) = self.within(event.target, elements.root, &TYPED) {
            let kind = self
                .inner
                .document
                .attribute(node, TYPE_ATTR)
                .and_then(|value| ActionKind::parse(&value));
            match kind {
                Some(ActionKind::Close) => self.dismiss(),
                Some(ActionKind::Cancel) => {
                    self.emit(ModalEvent::Cancel);
                    self.dismiss();
                }
                Some(ActionKind::Confirm) => {
                    self.emit(ModalEvent::Confirm);
                    self.dismiss();
                }
                None => trace!("ignoring unknown {TYPE_ATTR} on {node:?}"),
            }
            return;
        }

        let Some(node) = self.within(event.target, elements.footer, &ACTION) else {
            return;
        };
        let callback = self
            .inner
            .document
            .attribute(node, ACTION_ATTR)
            .and_then(|value| value.parse::<usize>().ok())
            .and_then(|index| self.inner.config.actions.get(index))
            .and_then(|action| action.callback.clone());
        if let Some(callback) = callback {
            callback(self);
        }
    }

    /// Nearest inclusive ancestor of `target` matching `selector` that lies
    /// inside `scope`.
    fn within(&self, target: NodeId, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let document = &self.inner.document;
        document
            .closest(target, selector)
            .filter(|node| document.contains(scope, *node))
    }
}
