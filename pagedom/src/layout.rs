//! Block layout measurement.
//!
//! Every element is a block stacked under its previous sibling; a text node
//! contributes one line per non-blank source line.

use crate::document::Tree;
use crate::element::{NodeId, NodeKind};
use crate::types::Height;

/// Height of one line of text, in pixels.
pub const LINE_HEIGHT: u32 = 20;

pub(crate) fn offset_height(tree: &Tree, node: NodeId) -> u32 {
    if !tree.is_rendered(node) {
        return 0;
    }
    match tree.nodes.get(node).map(|n| &n.kind) {
        Some(NodeKind::Element(data)) => match data.height {
            Height::Px(px) => px,
            Height::Auto => content_height(tree, node),
        },
        Some(NodeKind::Text(text)) => text_height(text),
        None => 0,
    }
}

pub(crate) fn scroll_height(tree: &Tree, node: NodeId) -> u32 {
    if !tree.is_rendered(node) {
        return 0;
    }
    match tree.nodes.get(node).map(|n| &n.kind) {
        Some(NodeKind::Element(_)) => content_height(tree, node),
        Some(NodeKind::Text(text)) => text_height(text),
        None => 0,
    }
}

fn content_height(tree: &Tree, node: NodeId) -> u32 {
    tree.nodes
        .get(node)
        .map(|n| {
            n.children
                .iter()
                .map(|child| offset_height(tree, *child))
                .fold(0u32, u32::saturating_add)
        })
        .unwrap_or(0)
}

fn text_height(text: &str) -> u32 {
    let lines = text.lines().filter(|line| !line.trim().is_empty()).count();
    u32::try_from(lines).unwrap_or(u32::MAX).saturating_mul(LINE_HEIGHT)
}
