use std::collections::HashMap;

use futures::future::{BoxFuture, Shared};
use pagedom::{ListenerId, NodeId};

use crate::{Error, Result};

/// Payload of `expand` and `collapse` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsibleSnapshot {
    pub title: NodeId,
    pub content: NodeId,
    pub index: usize,
}

pub(super) type Transition = Shared<BoxFuture<'static, Result<CollapsibleSnapshot>>>;

#[derive(Debug, Clone)]
pub(super) struct Item {
    pub title: NodeId,
    pub content: NodeId,
    /// Target state; flips when an operation starts, not when it settles.
    pub expanded: bool,
    /// Bumped by every operation so older animations know they lost.
    pub generation: u64,
}

/// Identifies one started operation on one item.
#[derive(Debug, Clone, Copy)]
pub(super) struct Ticket {
    pub title: NodeId,
    pub content: NodeId,
    pub index: usize,
    pub generation: u64,
}

#[derive(Default)]
pub(super) struct CollapsibleState {
    pub items: Vec<Item>,
    pub in_flight: HashMap<NodeId, Transition>,
    pub listener: Option<ListenerId>,
    pub destroyed: bool,
}

impl CollapsibleState {
    pub fn check(&self, index: usize) -> Result<&Item> {
        if self.destroyed {
            return Err(Error::Destroyed);
        }
        self.items.get(index).ok_or(Error::InvalidIndex {
            index,
            len: self.items.len(),
        })
    }

    pub fn position(&self, title: NodeId) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    pub fn in_flight(&self, index: usize) -> Option<Transition> {
        self.in_flight.get(&self.items[index].title).cloned()
    }

    /// Another item that is expanded or still animating.
    pub fn other_open(&self, index: usize) -> Option<usize> {
        self.items.iter().enumerate().find_map(|(i, item)| {
            (i != index && (item.expanded || self.in_flight.contains_key(&item.title))).then_some(i)
        })
    }

    /// Mark `index` as heading to `expanded` and hand out the ticket.
    pub fn advance(&mut self, index: usize, expanded: bool) -> Ticket {
        let item = &mut self.items[index];
        item.expanded = expanded;
        item.generation += 1;
        self.in_flight.remove(&item.title);
        Ticket {
            title: item.title,
            content: item.content,
            index,
            generation: item.generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !self.destroyed
            && self
                .items
                .iter()
                .any(|item| item.title == ticket.title && item.generation == ticket.generation)
    }

    pub fn snapshot(&self, index: usize) -> CollapsibleSnapshot {
        let item = &self.items[index];
        CollapsibleSnapshot {
            title: item.title,
            content: item.content,
            index,
        }
    }

    /// Snapshot for a ticket, following the item if a refresh moved it.
    pub fn snapshot_of(&self, ticket: &Ticket) -> CollapsibleSnapshot {
        match self.position(ticket.title) {
            Some(index) => self.snapshot(index),
            None => CollapsibleSnapshot {
                title: ticket.title,
                content: ticket.content,
                index: ticket.index,
            },
        }
    }
}
