use pagedom::{Document, DomError, Element, SelectorList};

fn sample() -> (Document, pagedom::NodeId) {
    let doc = Document::new();
    let list = doc
        .insert(
            doc.body(),
            Element::new("section")
                .id("list")
                .class("accordion")
                .child(
                    Element::div()
                        .class("item")
                        .child(Element::new("header").text("one"))
                        .child(Element::new("article").attr("data-kind", "plain").text("a")),
                )
                .child(
                    Element::div()
                        .class("item")
                        .class("special")
                        .child(Element::new("header").text("two"))
                        .child(
                            Element::new("article")
                                .attr("data-kind", "rich text")
                                .child(Element::new("a").attr("href", "/x").text("link")),
                        ),
                ),
        )
        .unwrap();
    (doc, list)
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_valid_selectors() {
    for source in [
        "header",
        "*",
        "#list",
        ".item.special",
        "div.item > header",
        "section article a",
        "[data-kind]",
        "[data-kind=plain]",
        "[data-kind=\"rich text\"]",
        "[data-kind='a, b']",
        "header, article",
        "  div   >   header  ",
    ] {
        assert!(SelectorList::parse(source).is_ok(), "{source} should parse");
    }
}

#[test]
fn test_parse_invalid_selectors() {
    for source in [
        "",
        ">",
        "div >",
        "div > > a",
        ".",
        ". item",
        "[data",
        "[data-kind=]",
        "[data-kind=a b]",
        "div..x",
        "a, ",
        ",a",
        ".a div.b#",
        "a:hover",
    ] {
        let err = SelectorList::parse(source).unwrap_err();
        assert!(
            matches!(err, DomError::InvalidSelector { .. }),
            "{source} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_type_selector_must_come_first() {
    assert!(SelectorList::parse(".item div").is_ok());
    assert!(SelectorList::parse(".itemdiv").is_ok());
    assert!(SelectorList::parse("#x.y").is_ok());
    assert!(SelectorList::parse("[a]div").is_err());
}

#[test]
fn test_parse_error_names_offending_token() {
    let err = SelectorList::parse("div + p").unwrap_err();
    assert_eq!(
        err,
        DomError::InvalidSelector {
            selector: "div + p".into(),
            reason: "unexpected `+`".into(),
        }
    );
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_attribute_values_accept_numbers_and_spacing() {
    let doc = Document::new();
    let footer = doc
        .insert(
            doc.body(),
            Element::new("footer")
                .child(Element::new("a").attr("data-action", "0"))
                .child(Element::new("a").attr("data-action", "1")),
        )
        .unwrap();

    assert_eq!(doc.query_all(footer, "[data-action=0]").unwrap().len(), 1);
    assert_eq!(doc.query_all(footer, "[ data-action = \"1\" ]").unwrap().len(), 1);
    assert_eq!(doc.query_all(footer, "footer>a[data-action]").unwrap().len(), 2);
}

#[test]
fn test_query_all_in_document_order() {
    let (doc, list) = sample();
    let headers = doc.query_all(list, "header").unwrap();
    assert_eq!(headers.len(), 2);
    assert_eq!(doc.text_content(headers[0]), "one");
    assert_eq!(doc.text_content(headers[1]), "two");
}

#[test]
fn test_query_excludes_scope_itself() {
    let (doc, list) = sample();
    assert!(doc.query(list, "#list").unwrap().is_none());
    assert_eq!(doc.query(doc.body(), "#list").unwrap(), Some(list));
}

#[test]
fn test_compound_and_attribute_matching() {
    let (doc, list) = sample();
    assert_eq!(doc.query_all(list, ".item.special").unwrap().len(), 1);
    assert_eq!(doc.query_all(list, "[data-kind]").unwrap().len(), 2);
    assert_eq!(doc.query_all(list, "[data-kind=plain]").unwrap().len(), 1);
    assert_eq!(doc.query_all(list, "[data-kind='rich text']").unwrap().len(), 1);
    assert_eq!(doc.query_all(list, "[data-kind=none]").unwrap().len(), 0);
}

#[test]
fn test_combinators() {
    let (doc, list) = sample();
    assert_eq!(doc.query_all(list, ".item > header").unwrap().len(), 2);
    assert_eq!(doc.query_all(list, "section > header").unwrap().len(), 0);
    assert_eq!(doc.query_all(list, "section header").unwrap().len(), 2);
    assert_eq!(doc.query_all(list, ".special a").unwrap().len(), 1);
    assert_eq!(doc.query_all(list, ".item > a").unwrap().len(), 0);
}

#[test]
fn test_ancestors_outside_scope_take_part() {
    let (doc, list) = sample();
    let item = doc.query(list, ".special").unwrap().unwrap();
    // `section` lies outside the scope but still satisfies the descendant part.
    assert_eq!(doc.query_all(item, "section header").unwrap().len(), 1);
}

#[test]
fn test_selector_list_matches_any() {
    let (doc, list) = sample();
    assert_eq!(doc.query_all(list, "header, article").unwrap().len(), 4);
}

#[test]
fn test_closest() {
    let (doc, list) = sample();
    let link = doc.query(list, "a").unwrap().unwrap();
    let item = SelectorList::parse(".item").unwrap();
    let closest = doc.closest(link, &item).unwrap();
    assert!(doc.has_class(closest, "special"));

    let anchor = SelectorList::parse("a").unwrap();
    assert_eq!(doc.closest(link, &anchor), Some(link));

    let missing = SelectorList::parse(".nope").unwrap();
    assert_eq!(doc.closest(link, &missing), None);
}

#[test]
fn test_text_nodes_never_match() {
    let doc = Document::new();
    let text = doc.create_text("hello");
    let any = SelectorList::parse("*").unwrap();
    assert!(!doc.matches(text, &any));
}
