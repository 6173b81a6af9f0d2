//! Waiting for a style transition to report completion.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{trace, warn};
use pagedom::event::TRANSITION_END;
use pagedom::{Document, DomEvent, ListenerId, NodeId, TransitionProperty};
use tokio::sync::oneshot;

use crate::Result;

/// Added to the declared duration before giving up on `transitionend`.
pub const TIMEOUT_MARGIN: Duration = Duration::from_millis(50);

/// How a [`TransitionWatch`] settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settled {
    /// No transition is declared for the property.
    Immediate,
    /// `transitionend` arrived.
    Ended,
    /// The event never arrived, the timeout fallback fired.
    TimedOut,
    /// The node was removed while waiting.
    Removed,
}

/// Listens for `transitionend` of one property on one node.
///
/// Create the watch right after changing the style; the duration is read
/// from the computed style at that point. The end event is dispatched from a
/// timer task, so on a current-thread runtime it cannot arrive before the
/// watch exists. On a multi-thread runtime a very short transition may end
/// first, in which case [`settle`](Self::settle) falls back to the timeout.
/// Dropping the watch removes its listener.
pub(crate) struct TransitionWatch {
    document: Document,
    node: NodeId,
    property: TransitionProperty,
    limit: Duration,
    listener: Option<ListenerId>,
    rx: Option<oneshot::Receiver<()>>,
}

impl TransitionWatch {
    pub(crate) fn new(document: &Document, node: NodeId, property: TransitionProperty) -> Result<Self> {
        let total = document
            .transition(node, property)
            .map(|config| config.total())
            .unwrap_or_default();

        let mut watch = Self {
            document: document.clone(),
            node,
            property,
            limit: total + TIMEOUT_MARGIN,
            listener: None,
            rx: None,
        };
        if total.is_zero() {
            return Ok(watch);
        }

        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let listener = document.add_listener(node, TRANSITION_END, move |event: &DomEvent| {
            if event.target != node || event.property != Some(property) {
                return;
            }
            if let Some(tx) = tx.lock().unwrap_or_else(|e| e.into_inner()).take() {
                let _ = tx.send(());
            }
        })?;
        watch.listener = Some(listener);
        watch.rx = Some(rx);
        Ok(watch)
    }

    pub(crate) async fn settle(mut self) -> Settled {
        let Some(rx) = self.rx.take() else {
            return Settled::Immediate;
        };
        let settled = match tokio::time::timeout(self.limit, rx).await {
            Ok(Ok(())) => Settled::Ended,
            Ok(Err(_)) => Settled::Removed,
            Err(_) => {
                warn!(
                    "no {} transitionend on {:?} within {:?}, continuing",
                    self.property, self.node, self.limit
                );
                Settled::TimedOut
            }
        };
        trace!("{} transition on {:?} settled: {settled:?}", self.property, self.node);
        settled
    }
}

impl Drop for TransitionWatch {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.document.remove_listener(listener);
        }
    }
}
