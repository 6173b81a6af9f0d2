use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagedom::{Document, DomError, Element, Navigation, NodeId, Style, Transitions};
use pagekit::prelude::*;
use pagekit::transition::TIMEOUT_MARGIN;
use pagekit::widgets::modal::{ModalClassOptions, ModalConfig};
use tokio::time::Instant;

const FADE: Duration = Duration::from_millis(300);

/// Document with a fade-in/fade-out stylesheet for the default classes.
fn styled() -> Document {
    let doc = Document::new();
    doc.add_rule(
        ".modal",
        Style::new()
            .opacity(0.0)
            .transitions(Transitions::new().opacity(FADE)),
    )
    .unwrap();
    doc.add_rule(".modal.modal-enter", Style::new().opacity(1.0))
        .unwrap();
    doc
}

fn record(modal: &Modal) -> Arc<Mutex<Vec<ModalEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    modal.on(pagekit::WILDCARD, move |event: &ModalEvent| {
        sink.lock().unwrap().push(*event)
    });
    events
}

fn find(doc: &Document, scope: NodeId, selector: &str) -> NodeId {
    doc.query(scope, selector).unwrap().unwrap()
}

fn confirm_dialog() -> ModalOptions {
    ModalOptions::new()
        .title("Delete file?")
        .content(r#"<p>This cannot be undone. <a data-type="confirm">Delete</a></p>"#)
        .action(ModalAction::cancel("Cancel").class("btn"))
        .action(ModalAction::confirm("Delete").class("btn danger"))
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_renders_detached_skeleton() {
    let doc = styled();
    let nodes = doc.node_count();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let elements = *modal.elements();

    assert!(doc.node_count() > nodes);
    assert!(!doc.is_connected(elements.root));
    assert_eq!(modal.state(), ModalState::Closed);

    assert_eq!(doc.children(elements.root), vec![elements.body, elements.backdrop]);
    assert_eq!(
        doc.children(elements.body),
        vec![elements.header, elements.content, elements.footer]
    );
    assert!(doc.has_class(elements.root, "modal"));
    assert!(doc.has_class(elements.body, "modal-body"));
    assert!(doc.has_class(elements.backdrop, "modal-backdrop"));
    assert_eq!(doc.text_content(elements.header), "Delete file?");
    assert_eq!(doc.tag(elements.header).as_deref(), Some("header"));
    assert_eq!(doc.tag(elements.footer).as_deref(), Some("footer"));
}

#[test]
fn test_renders_footer_actions() {
    let doc = Document::new();
    let options = ModalOptions::new()
        .action(ModalAction::close("OK"))
        .action(ModalAction::new("Docs").redirect("/docs").target("_blank"))
        .action(ModalAction::new("Later").class("muted"));
    let modal = Modal::new(&doc, &options).unwrap();

    assert_eq!(
        doc.inner_markup(modal.elements().footer),
        concat!(
            r#"<a data-action="0" data-type="close">OK</a>"#,
            r#"<a data-action="1" href="/docs" target="_blank">Docs</a>"#,
            r#"<a class="muted" data-action="2">Later</a>"#,
        )
    );
}

#[test]
fn test_header_empty_without_title() {
    let doc = Document::new();
    let modal = Modal::new(&doc, &ModalOptions::new().content("<p>hi</p>")).unwrap();

    assert_eq!(doc.text_content(modal.elements().header), "");
    assert_eq!(doc.inner_markup(modal.elements().content), "<p>hi</p>");
}

#[test]
fn test_invalid_content_leaves_document_untouched() {
    let doc = Document::new();
    let nodes = doc.node_count();

    let err = Modal::new(&doc, &ModalOptions::new().content("<p><b>open</p>")).unwrap_err();

    assert!(matches!(err, Error::Dom(DomError::Markup { .. })));
    assert_eq!(doc.node_count(), nodes);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_animation_requires_classes() {
    let doc = Document::new();
    let options = ModalOptions::new().classes(ModalClassOptions {
        enter: Some(String::new()),
        ..Default::default()
    });

    let err = Modal::new(&doc, &options).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));

    // Fine once animation is off.
    assert!(Modal::new(&doc, &options.animation(false)).is_ok());
}

#[test]
fn test_missing_host_fails() {
    let doc = Document::new();
    let gone = doc.insert(doc.body(), Element::div()).unwrap();
    doc.remove(gone).unwrap();

    let err = Modal::new(&doc, &ModalOptions::new().host(gone)).unwrap_err();
    assert!(matches!(err, Error::MissingElement(_)));
}

// ============================================================================
// Open / Close
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_open_then_close() {
    let doc = styled();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let events = record(&modal);
    let root = modal.elements().root;

    let start = Instant::now();
    modal.open().await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= FADE && elapsed < FADE + TIMEOUT_MARGIN);
    assert_eq!(modal.state(), ModalState::Open);
    assert_eq!(doc.parent(root), Some(doc.body()));
    assert!(doc.has_class(root, "modal-enter"));

    modal.close().await.unwrap();

    assert_eq!(modal.state(), ModalState::Closed);
    assert!(!doc.is_connected(root));
    assert!(doc.exists(root));
    assert!(!doc.has_class(root, "modal-enter"));
    assert!(!doc.has_class(root, "modal-leave"));
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open, ModalEvent::Close]);
}

#[tokio::test(start_paused = true)]
async fn test_intermediate_states() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let root = modal.elements().root;

    let task = tokio::spawn({
        let modal = modal.clone();
        async move { modal.open().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(modal.state(), ModalState::Opening);
    assert!(doc.is_connected(root));
    task.await.unwrap().unwrap();

    let task = tokio::spawn({
        let modal = modal.clone();
        async move { modal.close().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(modal.state(), ModalState::Closing);
    assert!(doc.has_class(root, "modal-leave"));
    assert!(doc.is_connected(root));
    task.await.unwrap().unwrap();

    assert!(!doc.is_connected(root));
}

#[tokio::test(start_paused = true)]
async fn test_close_when_closed_emits_nothing() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);

    modal.close().await.unwrap();

    assert_eq!(modal.state(), ModalState::Closed);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_opens_share_one_transition() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);

    let (a, b) = tokio::join!(modal.open(), modal.open());
    a.unwrap();
    b.unwrap();
    modal.open().await.unwrap();

    assert_eq!(modal.state(), ModalState::Open);
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open]);
}

#[tokio::test(start_paused = true)]
async fn test_close_during_open_resolves_with_open() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);

    let (opened, closed) = tokio::join!(modal.open(), modal.close());
    opened.unwrap();
    closed.unwrap();

    assert_eq!(modal.state(), ModalState::Open);
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open]);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_while_opening_closes_after_open() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);

    let opening = tokio::spawn({
        let modal = modal.clone();
        async move { modal.open().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    modal.dismiss();
    opening.await.unwrap().unwrap();
    tokio::time::sleep(FADE + TIMEOUT_MARGIN).await;

    assert_eq!(modal.state(), ModalState::Closed);
    assert!(!doc.is_connected(modal.elements().root));
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open, ModalEvent::Close]);
}

#[tokio::test(start_paused = true)]
async fn test_without_animation_opens_immediately() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new().animation(false)).unwrap();
    let root = modal.elements().root;

    let start = Instant::now();
    modal.open().await.unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(!doc.has_class(root, "modal-enter"));
    assert_eq!(modal.state(), ModalState::Open);

    modal.close().await.unwrap();
    assert!(!doc.is_connected(root));
}

#[tokio::test(start_paused = true)]
async fn test_missing_transition_end_settles_through_timeout() {
    // A declared transition whose value never changes produces no end event.
    let doc = Document::new();
    doc.add_rule(".modal", Style::new().transitions(Transitions::new().opacity(FADE)))
        .unwrap();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();

    let start = Instant::now();
    modal.open().await.unwrap();

    assert!(start.elapsed() >= FADE + TIMEOUT_MARGIN);
    assert_eq!(modal.state(), ModalState::Open);
}

#[tokio::test(start_paused = true)]
async fn test_mounts_into_custom_host() {
    let doc = styled();
    let container = doc.insert(doc.body(), Element::div().id("overlay")).unwrap();
    let modal = Modal::new(&doc, &ModalOptions::new().host(container)).unwrap();

    modal.open().await.unwrap();
    assert_eq!(doc.parent(modal.elements().root), Some(container));
}

#[test]
fn test_direct_open_and_close() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);
    let root = modal.elements().root;

    modal.open_now().unwrap();
    assert!(doc.is_connected(root));
    assert!(doc.has_class(root, "modal-enter"));
    assert!(modal.is_open());

    modal.close_now().unwrap();
    modal.close_now().unwrap();
    assert!(!doc.is_connected(root));
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open, ModalEvent::Close]);
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_confirm_in_content_emits_then_closes() {
    let doc = styled();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let events = record(&modal);
    modal.open().await.unwrap();

    let link = find(&doc, modal.elements().content, r#"[data-type="confirm"]"#);
    doc.click(link).unwrap();
    tokio::time::sleep(FADE + TIMEOUT_MARGIN).await;

    assert_eq!(
        *events.lock().unwrap(),
        vec![ModalEvent::Open, ModalEvent::Confirm, ModalEvent::Close]
    );
    assert_eq!(modal.state(), ModalState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_while_opening_still_closes() {
    let doc = styled();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let events = record(&modal);

    let opening = tokio::spawn({
        let modal = modal.clone();
        async move { modal.open().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(modal.state(), ModalState::Opening);

    let link = find(&doc, modal.elements().content, r#"[data-type="confirm"]"#);
    doc.click(link).unwrap();
    opening.await.unwrap().unwrap();
    tokio::time::sleep(FADE * 3).await;

    assert_eq!(
        *events.lock().unwrap(),
        vec![ModalEvent::Confirm, ModalEvent::Open, ModalEvent::Close]
    );
    assert_eq!(modal.state(), ModalState::Closed);
    assert!(!doc.is_connected(modal.elements().root));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_action_in_footer() {
    let doc = styled();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let events = record(&modal);
    modal.open().await.unwrap();

    let cancel = find(&doc, modal.elements().footer, r#"[data-type="cancel"]"#);
    doc.click(cancel).unwrap();
    tokio::time::sleep(FADE + TIMEOUT_MARGIN).await;

    assert_eq!(
        *events.lock().unwrap(),
        vec![ModalEvent::Open, ModalEvent::Cancel, ModalEvent::Close]
    );
}

#[tokio::test(start_paused = true)]
async fn test_backdrop_click_closes_with_autoclose() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    modal.open().await.unwrap();

    // Clicks inside the body are not backdrop clicks.
    doc.click(modal.elements().body).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(modal.state(), ModalState::Open);

    doc.click(modal.elements().backdrop).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(modal.state(), ModalState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_backdrop_click_ignored_without_autoclose() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new().autoclose(false)).unwrap();
    modal.open().await.unwrap();

    doc.click(modal.elements().backdrop).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(modal.state(), ModalState::Open);
}

#[tokio::test(start_paused = true)]
async fn test_action_callback_receives_modal() {
    let doc = styled();
    let calls = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&calls);
    let options = ModalOptions::new().action(ModalAction::new("Save").callback(move |modal: &Modal| {
        *sink.lock().unwrap() += 1;
        modal.dismiss();
    }));
    let modal = Modal::new(&doc, &options).unwrap();
    modal.open().await.unwrap();

    let button = find(&doc, modal.elements().footer, "a");
    doc.click(button).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(modal.state(), ModalState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_redirect_action_navigates() {
    let doc = styled();
    let options = ModalOptions::new().action(ModalAction::new("Docs").redirect("/docs").target("_blank"));
    let modal = Modal::new(&doc, &options).unwrap();
    modal.open().await.unwrap();

    doc.click(find(&doc, modal.elements().footer, "a")).unwrap();

    assert_eq!(
        doc.navigations(),
        vec![Navigation {
            href: "/docs".into(),
            target: Some("_blank".into()),
        }]
    );
    assert_eq!(modal.state(), ModalState::Open);
}

#[test]
fn test_dismiss_without_runtime_closes_immediately() {
    let doc = Document::new();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    modal.open_now().unwrap();

    doc.click(modal.elements().backdrop).unwrap();

    assert_eq!(modal.state(), ModalState::Closed);
    assert!(!doc.is_connected(modal.elements().root));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_destroy_removes_without_close_event() {
    let doc = styled();
    let modal = Modal::new(&doc, &confirm_dialog()).unwrap();
    let events = record(&modal);
    modal.open().await.unwrap();
    let root = modal.elements().root;

    modal.destroy();

    assert!(!doc.exists(root));
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(*events.lock().unwrap(), vec![ModalEvent::Open]);
    assert_eq!(modal.open().await.unwrap_err(), Error::Destroyed);
    assert_eq!(modal.close().await.unwrap_err(), Error::Destroyed);
}

#[tokio::test(start_paused = true)]
async fn test_destroy_during_open_fails_pending_call() {
    let doc = styled();
    let modal = Modal::new(&doc, &ModalOptions::new()).unwrap();
    let events = record(&modal);

    let task = tokio::spawn({
        let modal = modal.clone();
        async move { modal.open().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    modal.destroy();

    assert_eq!(task.await.unwrap().unwrap_err(), Error::Destroyed);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_with_defaults_uses_configured_values() {
    let doc = Document::new();
    let mut defaults = WidgetDefaults::new();
    let before = Modal::with_defaults(&doc, &defaults, &ModalOptions::new()).unwrap();

    defaults.configure_modal(&ModalOptions::new().autoclose(false).title("Notice"));
    let after = Modal::with_defaults(&doc, &defaults, &ModalOptions::new()).unwrap();

    assert!(before.config().autoclose);
    assert!(!after.config().autoclose);
    assert_eq!(doc.text_content(after.elements().header), "Notice");
    assert_eq!(ModalConfig::default().title, None);
}
