//! Markup fragments: parsing into element descriptions and serializing nodes.
//!
//! Fragments must be well-formed apart from the usual void elements (`<br>`,
//! `<img ...>`), which may be left open.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::element::{Child, Element};
use crate::error::{DomError, Result};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse a markup fragment into detached element descriptions.
///
/// Whitespace-only text between elements is dropped; other text is kept
/// verbatim.
pub fn parse_fragment(markup: &str) -> Result<Vec<Child>> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    // Void elements are left open, so nesting is checked here instead.
    config.check_end_names = false;

    // The bottom entry collects top-level nodes.
    let mut stack: Vec<Element> = vec![Element::new("#fragment")];

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| DomError::Markup {
            position,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(start) => {
                let element = start_element(&start, position)?;
                if is_void(&element.tag) {
                    push_child(&mut stack, Child::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(empty) => {
                let element = start_element(&empty, position)?;
                push_child(&mut stack, Child::Element(element));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                if is_void(&name) {
                    continue;
                }
                if stack.len() < 2 || stack.last().is_some_and(|open| open.tag != name) {
                    return Err(DomError::Markup {
                        position,
                        message: format!("unexpected closing tag `{name}`"),
                    });
                }
                if let Some(element) = stack.pop() {
                    push_child(&mut stack, Child::Element(element));
                }
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                if !content.trim().is_empty() {
                    push_child(&mut stack, Child::Text(content));
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata).into_owned();
                push_child(&mut stack, Child::Text(content));
            }
            Event::Eof => break,
            // Comments, declarations, processing instructions and doctypes
            // carry nothing the document keeps.
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|e| e.tag.clone()).unwrap_or_default();
        return Err(DomError::Markup {
            position: markup.len() as u64,
            message: format!("unclosed element `{open}`"),
        });
    }

    Ok(stack.pop().map(|root| root.children).unwrap_or_default())
}

fn start_element(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut element = Element::new(tag);

    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| DomError::Markup {
            position,
            message: e.to_string(),
        })?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = attr
            .unescape_value()
            .map_err(|e| DomError::Markup {
                position,
                message: e.to_string(),
            })?
            .into_owned();

        match name.as_str() {
            "id" => element = element.id(value),
            "class" => {
                for class in value.split_whitespace() {
                    element = element.class(class);
                }
            }
            _ => element = element.attr(name, value),
        }
    }

    Ok(element)
}

fn push_child(stack: &mut [Element], child: Child) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(child);
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    escape(text).into_owned()
}
