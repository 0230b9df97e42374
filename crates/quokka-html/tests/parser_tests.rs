//! Parser tests: structure building, attributes, and option gating.

use quokka_dom::{Document, NodeId, NodeKind};
use quokka_html::{parse, parse_with_options, ParseOptions};

fn parse_ok(input: &str) -> Document {
    let (doc, outcome) = parse(input);
    assert!(outcome.is_ok(), "unexpected outcome: {outcome}");
    doc
}

fn parse_ok_with(input: &str, options: &ParseOptions) -> Document {
    let (doc, outcome) = parse_with_options(input, options);
    assert!(outcome.is_ok(), "unexpected outcome: {outcome}");
    doc
}

fn find_element(doc: &Document, name: &str) -> NodeId {
    doc.find_node(doc.root(), |node| node.name() == name)
        .unwrap_or_else(|| panic!("no <{name}> element"))
}

#[test]
fn test_basic_structure() {
    let doc = parse_ok("<html><head><title>T</title></head><body><p>hi</p></body></html>");
    let html = doc.first_child(doc.root()).expect("root has a child");
    assert_eq!(doc.name(html), "HTML");

    let head = doc.child(html, "HEAD").expect("head");
    assert_eq!(doc.child_value_named(head, "TITLE"), "T");

    let body = doc.child(html, "BODY").expect("body");
    assert_eq!(doc.child_value_named(body, "P"), "hi");
}

#[test]
fn test_names_are_upper_cased() {
    let doc = parse_ok("<DiV dAtA-x=\"1\">x</dIv>");
    let div = find_element(&doc, "DIV");
    assert_eq!(doc.attribute(div, "DATA-X"), Some("1"));
}

#[test]
fn test_attribute_order_is_preserved() {
    let doc = parse_ok("<div id=\"a\" class=\"b\" width=\"10\"></div>");
    let div = find_element(&doc, "DIV");
    let names: Vec<&str> = doc.attributes(div).iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["ID", "CLASS", "WIDTH"]);
    assert_eq!(doc.first_attribute(div).map(|a| a.value.as_str()), Some("a"));
    assert_eq!(doc.last_attribute(div).map(|a| a.value.as_str()), Some("10"));
}

#[test]
fn test_valueless_attribute() {
    let doc = parse_ok("<input disabled>");
    let input = find_element(&doc, "INPUT");
    assert_eq!(doc.attribute(input, "DISABLED"), Some(""));
    // INPUT is a void element: nothing nests under it.
    assert_eq!(doc.first_child(input), None);
}

#[test]
fn test_single_quoted_attribute() {
    let doc = parse_ok("<div id='main'></div>");
    assert_eq!(doc.attribute(find_element(&doc, "DIV"), "ID"), Some("main"));
}

#[test]
fn test_comments_gated_by_option() {
    let input = "<html><!-- note --></html>";
    let doc = parse_ok(input);
    assert_eq!(doc.first_child(find_element(&doc, "HTML")), None);

    let doc = parse_ok_with(input, &ParseOptions::default().with_comments(true));
    let comment = doc
        .first_child(find_element(&doc, "HTML"))
        .expect("comment materialized");
    assert!(matches!(doc.kind(comment), Some(NodeKind::Comment(_))));
    assert_eq!(doc.value(comment), " note ");
}

#[test]
fn test_pi_gated_by_option() {
    let input = "<html><?robot index=\"no\"?></html>";
    let doc = parse_ok(input);
    assert_eq!(doc.first_child(find_element(&doc, "HTML")), None);

    let doc = parse_ok_with(input, &ParseOptions::default().with_pi(true));
    let pi = doc
        .first_child(find_element(&doc, "HTML"))
        .expect("pi materialized");
    assert_eq!(doc.name(pi), "ROBOT");
    assert_eq!(doc.value(pi), "index=\"no\"");
}

#[test]
fn test_cdata_on_by_default() {
    let doc = parse_ok("<p><![CDATA[x<y]]></p>");
    let p = find_element(&doc, "P");
    let cdata = doc.first_child(p).expect("cdata child");
    assert!(matches!(doc.kind(cdata), Some(NodeKind::CData(_))));
    assert_eq!(doc.value(cdata), "x<y");
    // CDATA counts as text for content queries.
    assert_eq!(doc.child_value(p), "x<y");

    let doc = parse_ok_with(
        "<p><![CDATA[x<y]]></p>",
        &ParseOptions::default().with_cdata(false),
    );
    assert_eq!(doc.first_child(find_element(&doc, "P")), None);
}

#[test]
fn test_doctype_gated_and_document_scoped() {
    let input = "<!DOCTYPE html><html></html>";
    let doc = parse_ok(input);
    let first = doc.first_child(doc.root()).expect("child");
    assert_eq!(doc.name(first), "HTML");

    let doc = parse_ok_with(input, &ParseOptions::full());
    let first = doc.first_child(doc.root()).expect("child");
    assert!(matches!(doc.kind(first), Some(NodeKind::Doctype(_))));
    assert_eq!(doc.value(first), "html");

    // A doctype below the document level is scanned but not attached.
    let doc = parse_ok_with("<html><!DOCTYPE html></html>", &ParseOptions::full());
    assert_eq!(doc.first_child(find_element(&doc, "HTML")), None);
}

#[test]
fn test_declaration_parsed_with_full_options() {
    let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><html></html>";
    let doc = parse_ok_with(input, &ParseOptions::full());
    let decl = doc.first_child(doc.root()).expect("declaration");
    assert!(matches!(doc.kind(decl), Some(NodeKind::Declaration(_))));
    assert_eq!(doc.attribute(decl, "VERSION"), Some("1.0"));
    assert_eq!(doc.attribute(decl, "ENCODING"), Some("UTF-8"));

    // Default options scan past it without materializing.
    let doc = parse_ok(input);
    assert_eq!(doc.name(doc.first_child(doc.root()).expect("child")), "HTML");
}

#[test]
fn test_whitespace_text_discarded_by_default() {
    let input = "<html>  \n  <body></body></html>";
    let doc = parse_ok(input);
    let html = find_element(&doc, "HTML");
    assert_eq!(doc.name(doc.first_child(html).expect("child")), "BODY");

    let doc = parse_ok_with(input, &ParseOptions::default().with_whitespace_pcdata(true));
    let html = find_element(&doc, "HTML");
    let first = doc.first_child(html).expect("child");
    assert!(doc.kind(first).is_some_and(NodeKind::is_text));
    assert_eq!(doc.value(first), "  \n  ");
}

#[test]
fn test_escapes_decoded_in_text_and_attributes() {
    let doc = parse_ok("<p title=\"a&amp;b\">x&lt;y&#33;</p>");
    let p = find_element(&doc, "P");
    assert_eq!(doc.attribute(p, "TITLE"), Some("a&b"));
    assert_eq!(doc.child_value(p), "x<y!");

    let doc = parse_ok_with("<p>x&lt;y</p>", &ParseOptions::minimal());
    assert_eq!(doc.child_value(find_element(&doc, "P")), "x&lt;y");
}

#[test]
fn test_eol_normalization_in_text() {
    let doc = parse_ok("<p>a\r\nb\rc</p>");
    assert_eq!(doc.child_value(find_element(&doc, "P")), "a\nb\nc");

    let doc = parse_ok_with("<p>a\r\nb</p>", &ParseOptions::default().with_eol(false));
    assert_eq!(doc.child_value(find_element(&doc, "P")), "a\r\nb");
}

#[test]
fn test_attribute_whitespace_conversion() {
    let doc = parse_ok("<p title=\"a\tb\nc\"></p>");
    assert_eq!(doc.attribute(find_element(&doc, "P"), "TITLE"), Some("a b c"));
}

#[test]
fn test_attribute_whitespace_normalization() {
    let options = ParseOptions::default().with_wnorm_attribute(true);
    let doc = parse_ok_with("<p title=\"  a   b  \"></p>", &options);
    assert_eq!(doc.attribute(find_element(&doc, "P"), "TITLE"), Some("a b"));
}

#[test]
fn test_empty_input() {
    let doc = parse_ok("");
    assert_eq!(doc.first_child(doc.root()), None);
}

#[test]
fn test_top_level_text() {
    let doc = parse_ok("hello");
    let text = doc.first_child(doc.root()).expect("text child");
    assert_eq!(doc.value(text), "hello");
}

#[test]
fn test_end_tag_with_trailing_whitespace() {
    let doc = parse_ok("<p>hi</p >");
    assert_eq!(doc.child_value(find_element(&doc, "P")), "hi");
}
