use pagedom::{Document, Element, NodeId};

use super::config::{ModalAction, ModalConfig};
use crate::Result;

/// Attribute holding the index of a footer action.
pub const ACTION_ATTR: &str = "data-action";
/// Attribute naming the built-in behaviour of an element.
pub const TYPE_ATTR: &str = "data-type";

/// Nodes of a rendered modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalElements {
    /// Outermost node, mounted into the host on open.
    pub root: NodeId,
    pub body: NodeId,
    pub header: NodeId,
    pub content: NodeId,
    pub footer: NodeId,
    pub backdrop: NodeId,
}

/// Build the detached modal tree.
pub(super) fn render(document: &Document, config: &ModalConfig) -> Result<ModalElements> {
    let classes = &config.classes;
    let root = document.create(Element::div().class(&classes.host));
    match render_into(document, root, config) {
        Ok(elements) => Ok(elements),
        Err(e) => {
            let _ = document.remove(root);
            Err(e)
        }
    }
}

fn render_into(document: &Document, root: NodeId, config: &ModalConfig) -> Result<ModalElements> {
    let classes = &config.classes;
    let body = document.insert(root, Element::div().class(&classes.body))?;

    let mut header = Element::new("header");
    if let Some(title) = &config.title {
        header = header.text(title);
    }
    let header = document.insert(body, header)?;

    let content = document.insert(body, Element::new("section"))?;
    document.set_inner_markup(content, &config.content)?;

    let footer = document.insert(
        body,
        Element::new("footer").children(
            config
                .actions
                .iter()
                .enumerate()
                .map(|(index, action)| action_element(index, action)),
        ),
    )?;

    let backdrop = document.insert(root, Element::div().class(&classes.backdrop))?;

    Ok(ModalElements {
        root,
        body,
        header,
        content,
        footer,
        backdrop,
    })
}

fn action_element(index: usize, action: &ModalAction) -> Element {
    let mut element = Element::new("a")
        .attr(ACTION_ATTR, index.to_string())
        .text(&action.label);
    if let Some(class) = &action.class {
        element = element.class(class);
    }
    if let Some(kind) = action.kind {
        element = element.attr(TYPE_ATTR, kind.as_str());
    }
    if let Some(href) = &action.redirect {
        element = element.attr("href", href);
        if let Some(target) = &action.target {
            element = element.attr("target", target);
        }
    }
    element
}
