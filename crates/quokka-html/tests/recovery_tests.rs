//! Recovery tests: tag soup the parser repairs, and the damage it
//! refuses with a status and offset.

use quokka_dom::{Document, NodeId};
use quokka_html::{parse, ParseStatus};

fn parse_ok(input: &str) -> Document {
    let (doc, outcome) = parse(input);
    assert!(outcome.is_ok(), "unexpected outcome: {outcome}");
    doc
}

fn find_element(doc: &Document, name: &str) -> NodeId {
    doc.find_node(doc.root(), |node| node.name() == name)
        .unwrap_or_else(|| panic!("no <{name}> element"))
}

fn element_names(doc: &Document, parent: NodeId) -> Vec<String> {
    doc.children(parent)
        .filter(|&c| doc.kind(c).is_some_and(quokka_dom::NodeKind::is_element))
        .map(|c| doc.name(c).to_string())
        .collect()
}

#[test]
fn test_void_element_with_and_without_slash() {
    let plain = parse_ok("<p>a<br>b</p>");
    let slashed = parse_ok("<p>a<br/>b</p>");

    for doc in [&plain, &slashed] {
        let p = find_element(doc, "P");
        let kids: Vec<NodeId> = doc.children(p).collect();
        assert_eq!(kids.len(), 3);
        assert_eq!(doc.value(kids[0]), "a");
        assert_eq!(doc.name(kids[1]), "BR");
        assert_eq!(doc.first_child(kids[1]), None);
        assert_eq!(doc.value(kids[2]), "b");
    }
}

#[test]
fn test_sibling_cell_implies_end_tag() {
    let doc = parse_ok("<table><td>col1<td>col2</table>");
    let table = find_element(&doc, "TABLE");
    assert_eq!(element_names(&doc, table), ["TD", "TD"]);
    let cells: Vec<NodeId> = doc.children(table).collect();
    assert_eq!(doc.child_value(cells[0]), "col1");
    assert_eq!(doc.child_value(cells[1]), "col2");
}

#[test]
fn test_ancestor_end_tag_closes_open_cell() {
    let doc = parse_ok("<table><tr><td>col1</table>");
    let table = find_element(&doc, "TABLE");
    assert_eq!(element_names(&doc, table), ["TR"]);
    let tr = find_element(&doc, "TR");
    assert_eq!(element_names(&doc, tr), ["TD"]);
    assert_eq!(doc.child_value(find_element(&doc, "TD")), "col1");
}

#[test]
fn test_row_start_closes_cell_and_previous_row() {
    let doc = parse_ok("<table><tr><td>a<tr><td>b</table>");
    let table = find_element(&doc, "TABLE");
    assert_eq!(element_names(&doc, table), ["TR", "TR"]);
    let rows: Vec<NodeId> = doc.children(table).collect();
    assert_eq!(doc.text_content(rows[0]), "a");
    assert_eq!(doc.text_content(rows[1]), "b");
}

#[test]
fn test_definition_list_recovery() {
    let doc = parse_ok("<dl><dt>term<dd>definition</dl>");
    let dl = find_element(&doc, "DL");
    assert_eq!(element_names(&doc, dl), ["DT", "DD"]);
}

#[test]
fn test_unclosed_elements_at_end_of_input() {
    let doc = parse_ok("<html><body><p>hi");
    let body = find_element(&doc, "BODY");
    assert_eq!(doc.child_value_named(body, "P"), "hi");
}

#[test]
fn test_unquoted_attribute_value() {
    let doc = parse_ok("<div id=main class=a>x</div>");
    let div = find_element(&doc, "DIV");
    assert_eq!(doc.attribute(div, "ID"), Some("main"));
    assert_eq!(doc.attribute(div, "CLASS"), Some("a"));
    assert_eq!(doc.child_value(div), "x");
}

#[test]
fn test_unquoted_url_attribute_value() {
    // Mid-value slashes are content; only whitespace, `>`, or a
    // tag-closing `/>` terminate the recovered value.
    let doc = parse_ok("<a href=http://example.com/page>x</a>");
    let a = find_element(&doc, "A");
    assert_eq!(doc.attribute(a, "HREF"), Some("http://example.com/page"));
    assert_eq!(doc.child_value(a), "x");
}

#[test]
fn test_unquoted_value_terminated_by_slash() {
    let doc = parse_ok("<br width=4/>");
    assert_eq!(doc.attribute(find_element(&doc, "BR"), "WIDTH"), Some("4"));
}

#[test]
fn test_stray_end_tag_is_a_mismatch() {
    let (doc, outcome) = parse("<html></div></html>");
    assert_eq!(outcome.status, ParseStatus::EndElementMismatch);
    assert_eq!(outcome.offset, 12);
    // The prefix built before the failure is still a tree.
    assert_eq!(doc.name(doc.first_child(doc.root()).expect("child")), "HTML");
}

#[test]
fn test_end_tag_at_document_level_is_a_mismatch() {
    let (_, outcome) = parse("</p>");
    assert_eq!(outcome.status, ParseStatus::EndElementMismatch);
}

#[test]
fn test_unterminated_comment() {
    let (_, outcome) = parse("<html><!-- oops");
    assert_eq!(outcome.status, ParseStatus::BadComment);
    assert_eq!(outcome.offset, 10);
}

#[test]
fn test_unterminated_cdata() {
    let (_, outcome) = parse("<p><![CDATA[oops");
    assert_eq!(outcome.status, ParseStatus::BadCData);
}

#[test]
fn test_unterminated_doctype() {
    let (_, outcome) = parse("<!DOCTYPE html [ <!ELEMENT foo >");
    assert_eq!(outcome.status, ParseStatus::BadDoctype);
}

#[test]
fn test_unterminated_processing_instruction() {
    let (_, outcome) = parse("<html><?robot oops");
    assert_eq!(outcome.status, ParseStatus::BadProcessingInstruction);
}

#[test]
fn test_junk_after_angle_bracket() {
    let (_, outcome) = parse("<@");
    assert_eq!(outcome.status, ParseStatus::UnrecognizedTag);
    assert_eq!(outcome.offset, 1);
}

#[test]
fn test_angle_bracket_at_end_of_input() {
    let (_, outcome) = parse("<p>hi<");
    assert_eq!(outcome.status, ParseStatus::UnrecognizedTag);
}

#[test]
fn test_unterminated_attribute_value() {
    let (_, outcome) = parse("<div id=\"main>");
    assert_eq!(outcome.status, ParseStatus::BadAttribute);
}

#[test]
fn test_prefix_tree_survives_failure() {
    let (doc, outcome) = parse("<html><p>hi</p><@");
    assert!(!outcome.is_ok());
    let html = find_element(&doc, "HTML");
    assert_eq!(doc.child_value_named(html, "P"), "hi");
}

#[test]
fn test_doctype_with_internal_subset() {
    let doc = parse_ok(concat!(
        "<!DOCTYPE html [",
        " <!ELEMENT p (#PCDATA)>",
        " <!-- inner -->",
        " <![IGNORE[ <![INCLUDE[ x ]]> ]]>",
        " ]><html></html>"
    ));
    assert_eq!(doc.name(doc.first_child(doc.root()).expect("child")), "HTML");
}
