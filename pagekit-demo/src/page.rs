//! The demo page: an FAQ list and a confirmation dialog.

use std::time::Duration;

use pagedom::{Display, Document, Element, NodeId, Style, Transitions};
use pagekit::prelude::*;

const QUESTIONS: &[(&str, &str)] = &[
    (
        "What is pagekit?",
        "Collapsible sections and modal dialogs\nfor a document tree.",
    ),
    (
        "Do animations block?",
        "No. Animated calls are async and resolve\nwhen the transition ends.",
    ),
    (
        "What if a transition never ends?",
        "A timeout of the declared duration\nplus a small margin settles it.",
    ),
];

/// Stylesheet for the default widget classes.
pub fn install_styles(doc: &Document) -> Result<()> {
    doc.add_rule(
        "article",
        Style::new()
            .display(Display::None)
            .transitions(Transitions::new().height(Duration::from_millis(250))),
    )?;
    doc.add_rule("article.active", Style::new().display(Display::Block))?;
    doc.add_rule(
        ".modal",
        Style::new()
            .opacity(0.0)
            .transitions(Transitions::new().opacity(Duration::from_millis(200))),
    )?;
    doc.add_rule(".modal.modal-enter", Style::new().opacity(1.0))?;
    Ok(())
}

/// Append the FAQ host and return it.
pub fn build_faq(doc: &Document) -> Result<NodeId> {
    let host = doc.insert(doc.body(), Element::new("section").id("faq"))?;
    for (question, answer) in QUESTIONS {
        doc.insert(
            host,
            Element::div()
                .class("faq-item")
                .child(Element::new("header").text(*question))
                .child(Element::new("article").text(*answer)),
        )?;
    }
    Ok(host)
}

/// Options for the "reset answers" confirmation dialog.
pub fn confirm_reset() -> ModalOptions {
    ModalOptions::new()
        .title("Reset answers?")
        .content("<p>All answers will be collapsed.</p>")
        .action(ModalAction::cancel("Keep"))
        .action(ModalAction::confirm("Reset").class("danger"))
        .action(ModalAction::new("Help").redirect("https://example.com/help").target("_blank"))
}
