//! Serialization tests: formatting, escaping, and CDATA splitting.

use quokka_dom::{serialize, serialize_node, Document, NodeId, SaveOptions};

fn plain() -> SaveOptions {
    SaveOptions::default().with_no_default_declaration(true)
}

fn doc_with_html() -> (Document, NodeId) {
    let mut doc = Document::new();
    let html = doc.alloc_element("HTML");
    assert!(doc.append_child(doc.root(), html));
    (doc, html)
}

#[test]
fn test_childless_element_self_closes() {
    let (doc, _) = doc_with_html();
    assert_eq!(serialize(&doc, &plain()), "<HTML />\n");
}

#[test]
fn test_default_declaration() {
    let (doc, _) = doc_with_html();
    assert_eq!(
        serialize(&doc, &SaveOptions::default()),
        "<?xml version=\"1.0\"?>\n<HTML />\n"
    );
}

#[test]
fn test_existing_declaration_suppresses_default() {
    let mut doc = Document::new();
    let decl = doc.alloc_declaration("xml");
    assert!(doc.append_attribute(decl, "version", "1.0").is_some());
    assert!(doc.append_child(doc.root(), decl));
    let html = doc.alloc_element("HTML");
    assert!(doc.append_child(doc.root(), html));

    assert_eq!(
        serialize(&doc, &SaveOptions::default()),
        "<?xml version=\"1.0\"?>\n<HTML />\n"
    );
}

#[test]
fn test_indented_output() {
    let (mut doc, html) = doc_with_html();
    let body = doc.alloc_element("BODY");
    assert!(doc.append_child(html, body));
    let p = doc.alloc_element("P");
    assert!(doc.append_child(body, p));

    assert_eq!(
        serialize(&doc, &plain()),
        "<HTML>\n\t<BODY>\n\t\t<P />\n\t</BODY>\n</HTML>\n"
    );
    assert_eq!(
        serialize(&doc, &plain().with_indent("  ")),
        "<HTML>\n  <BODY>\n    <P />\n  </BODY>\n</HTML>\n"
    );
}

#[test]
fn test_raw_output() {
    let (mut doc, html) = doc_with_html();
    let body = doc.alloc_element("BODY");
    assert!(doc.append_child(html, body));

    assert_eq!(
        serialize(&doc, &plain().with_raw(true)),
        "<HTML><BODY /></HTML>"
    );
}

#[test]
fn test_text_children_serialize_inline() {
    let (mut doc, html) = doc_with_html();
    let p = doc.alloc_element("P");
    assert!(doc.append_child(html, p));
    let hello = doc.alloc_text("hello ");
    assert!(doc.append_child(p, hello));
    let b = doc.alloc_element("B");
    assert!(doc.append_child(p, b));
    let bold = doc.alloc_text("bold");
    assert!(doc.append_child(b, bold));
    let tail = doc.alloc_text(" tail");
    assert!(doc.append_child(p, tail));

    // Mixed content stays on one line: injected indentation would become
    // part of the text on re-parse.
    assert_eq!(
        serialize(&doc, &plain()),
        "<HTML>\n\t<P>hello <B>bold</B> tail</P>\n</HTML>\n"
    );
}

#[test]
fn test_serialize_single_node() {
    let (mut doc, html) = doc_with_html();
    let p = doc.alloc_element("P");
    assert!(doc.append_child(html, p));
    let text = doc.alloc_text("hi");
    assert!(doc.append_child(p, text));

    assert_eq!(serialize_node(&doc, p, &plain()), "<P>hi</P>\n");
}

#[test]
fn test_text_escaping() {
    let mut doc = Document::new();
    let p = doc.alloc_element("P");
    assert!(doc.append_child(doc.root(), p));
    let text = doc.alloc_text("a&b<c>\"d\"");
    assert!(doc.append_child(p, text));

    // The quote is not escaped in text content.
    assert_eq!(
        serialize(&doc, &plain()),
        "<P>a&amp;b&lt;c&gt;\"d\"</P>\n"
    );
}

#[test]
fn test_attribute_escaping() {
    let mut doc = Document::new();
    let p = doc.alloc_element("P");
    assert!(doc.append_attribute(p, "TITLE", "a&b<c>\"d\"").is_some());
    assert!(doc.append_child(doc.root(), p));

    assert_eq!(
        serialize(&doc, &plain()),
        "<P TITLE=\"a&amp;b&lt;c&gt;&quot;d&quot;\" />\n"
    );
}

#[test]
fn test_control_character_escaping() {
    let mut doc = Document::new();
    let p = doc.alloc_element("P");
    assert!(doc.append_attribute(p, "DATA", "a\tb\nc\u{1}d").is_some());
    assert!(doc.append_child(doc.root(), p));
    let text = doc.alloc_text("x\ty\u{1}z");
    assert!(doc.append_child(p, text));

    // Tab/CR/LF stay literal in text but are escaped in attribute values
    // so they survive attribute whitespace conversion on re-parse.
    assert_eq!(
        serialize(&doc, &plain()),
        "<P DATA=\"a&#9;b&#10;c&#1;d\">x\ty&#1;z</P>\n"
    );
}

#[test]
fn test_cdata_terminator_split() {
    let mut doc = Document::new();
    let p = doc.alloc_element("P");
    assert!(doc.append_child(doc.root(), p));
    let cdata = doc.alloc_cdata("a]]>b");
    assert!(doc.append_child(p, cdata));

    assert_eq!(
        serialize(&doc, &plain()),
        "<P><![CDATA[a]]]]><![CDATA[>b]]></P>\n"
    );
}

#[test]
fn test_comment_pi_and_doctype() {
    let mut doc = Document::new();
    let doctype = doc.alloc_doctype("html");
    assert!(doc.append_child(doc.root(), doctype));
    let comment = doc.alloc_comment(" note ");
    assert!(doc.append_child(doc.root(), comment));
    let pi = doc.alloc_pi("ROBOT", "index=\"no\"");
    assert!(doc.append_child(doc.root(), pi));

    assert_eq!(
        serialize(&doc, &plain()),
        "<!DOCTYPE html>\n<!-- note -->\n<?ROBOT index=\"no\"?>\n"
    );
}

#[test]
fn test_anonymous_names() {
    let mut doc = Document::new();
    let unnamed = doc.alloc_element("");
    assert!(doc.append_attribute(unnamed, "", "v").is_some());
    assert!(doc.append_child(doc.root(), unnamed));

    assert_eq!(
        serialize(&doc, &plain()),
        "<:anonymous :anonymous=\"v\" />\n"
    );
}

#[test]
fn test_write_bom() {
    let (doc, _) = doc_with_html();
    let out = serialize(&doc, &plain().with_write_bom(true));
    assert_eq!(out, "\u{FEFF}<HTML />\n");
}
