//! Markup serialization.
//!
//! Walks a node and emits markup text, applying the escaping rules:
//! `&`/`<`/`>` always, `"` additionally inside attribute values, control
//! characters below 0x20 as numeric references (tab/CR/LF stay literal in
//! text but are escaped in attribute values so they survive re-parsing).
//! CDATA content is re-wrapped and split so `]]>` never appears inside a
//! section.

use crate::document::Document;
use crate::node::{Attribute, NodeId, NodeKind};

/// Name printed for elements and attributes with an empty name.
const ANONYMOUS: &str = ":anonymous";

/// Declaration line emitted for documents without an explicit declaration
/// node, unless suppressed.
const DEFAULT_DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Formatting options for serialization.
///
/// The default writes one node per line, indenting children with one tab
/// per depth level.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// String written once per depth level in front of each line.
    pub indent: String,
    /// Emit no indentation and no newlines at all.
    pub raw: bool,
    /// Prefix the output with a U+FEFF byte order mark.
    pub write_bom: bool,
    /// Suppress the default declaration emitted for documents that carry
    /// no declaration node.
    pub no_default_declaration: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            raw: false,
            write_bom: false,
            no_default_declaration: false,
        }
    }
}

impl SaveOptions {
    /// Set the per-depth indent string.
    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        indent.clone_into(&mut self.indent);
        self
    }

    /// Enable or disable raw output (no indentation, no newlines).
    #[must_use]
    pub const fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Enable or disable the leading byte order mark.
    #[must_use]
    pub const fn with_write_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }

    /// Enable or disable suppression of the default declaration.
    #[must_use]
    pub const fn with_no_default_declaration(mut self, suppress: bool) -> Self {
        self.no_default_declaration = suppress;
        self
    }
}

/// Serialize a whole document to markup text.
#[must_use]
pub fn serialize(doc: &Document, options: &SaveOptions) -> String {
    serialize_node(doc, doc.root(), options)
}

/// Serialize one node (and its subtree) to markup text.
///
/// Serializing the document root additionally emits the default
/// declaration when the document has none and the option allows it.
#[must_use]
pub fn serialize_node(doc: &Document, id: NodeId, options: &SaveOptions) -> String {
    let mut out = String::new();
    if options.write_bom {
        out.push('\u{FEFF}');
    }
    match doc.kind(id) {
        Some(NodeKind::Document) => {
            let has_declaration = doc
                .children(id)
                .any(|c| matches!(doc.kind(c), Some(NodeKind::Declaration(_))));
            if !has_declaration && !options.no_default_declaration {
                out.push_str(DEFAULT_DECLARATION);
                if !options.raw {
                    out.push('\n');
                }
            }
            for child in doc.children(id) {
                write_node(doc, child, &mut out, options, 0, false);
            }
        }
        Some(_) => write_node(doc, id, &mut out, options, 0, false),
        None => {}
    }
    out
}

/// Emit one node. `inline` suppresses this node's indentation and newline
/// (set for children of elements with text content, so no whitespace is
/// invented inside mixed content).
fn write_node(
    doc: &Document,
    id: NodeId,
    out: &mut String,
    options: &SaveOptions,
    depth: usize,
    inline: bool,
) {
    if !inline {
        write_indent(out, options, depth);
    }
    let Some(kind) = doc.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Document => {}
        NodeKind::Element(data) => {
            out.push('<');
            out.push_str(name_or_anonymous(&data.tag_name));
            write_attributes(out, &data.attributes);
            if doc.first_child(id).is_none() {
                out.push_str(" />");
            } else {
                // Once an element has text content, its children are kept
                // on one line; injected indentation would change the text.
                let has_text = doc.children(id).any(|c| {
                    doc.kind(c).is_some_and(NodeKind::is_text)
                });
                out.push('>');
                if has_text || inline || options.raw {
                    for child in doc.children(id) {
                        write_node(doc, child, out, options, 0, true);
                    }
                } else {
                    write_newline(out, options);
                    for child in doc.children(id) {
                        write_node(doc, child, out, options, depth + 1, false);
                    }
                    write_indent(out, options, depth);
                }
                out.push_str("</");
                out.push_str(name_or_anonymous(&data.tag_name));
                out.push('>');
            }
        }
        NodeKind::Text(value) => escape_text(out, value),
        NodeKind::CData(value) => write_cdata(out, value),
        NodeKind::Comment(value) => {
            out.push_str("<!--");
            out.push_str(value);
            out.push_str("-->");
        }
        NodeKind::ProcessingInstruction(data) => {
            out.push_str("<?");
            out.push_str(name_or_anonymous(&data.target));
            if !data.value.is_empty() {
                out.push(' ');
                out.push_str(&data.value);
            }
            out.push_str("?>");
        }
        NodeKind::Declaration(data) => {
            out.push_str("<?");
            out.push_str(name_or_anonymous(&data.target));
            write_attributes(out, &data.attributes);
            out.push_str("?>");
        }
        NodeKind::Doctype(value) => {
            out.push_str("<!DOCTYPE");
            if !value.is_empty() {
                out.push(' ');
                out.push_str(value);
            }
            out.push('>');
        }
    }
    if !inline {
        write_newline(out, options);
    }
}

fn write_attributes(out: &mut String, attributes: &[Attribute]) {
    for attr in attributes {
        out.push(' ');
        out.push_str(name_or_anonymous(&attr.name));
        out.push_str("=\"");
        escape_attribute(out, &attr.value);
        out.push('"');
    }
}

fn write_indent(out: &mut String, options: &SaveOptions, depth: usize) {
    if !options.raw {
        for _ in 0..depth {
            out.push_str(&options.indent);
        }
    }
}

fn write_newline(out: &mut String, options: &SaveOptions) {
    if !options.raw {
        out.push('\n');
    }
}

fn name_or_anonymous(name: &str) -> &str {
    if name.is_empty() { ANONYMOUS } else { name }
}

/// Escape element text: `&`, `<`, `>`, and control characters below 0x20
/// except tab/CR/LF.
fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
}

/// Escape an attribute value: like text, plus `"` and numeric escapes for
/// tab/CR/LF so the value round-trips through attribute normalization.
fn escape_attribute(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
}

/// Write CDATA content, splitting on embedded `]]>` so the terminator is
/// never emitted inside a section.
fn write_cdata(out: &mut String, value: &str) {
    let mut rest = value;
    loop {
        out.push_str("<![CDATA[");
        if let Some(pos) = rest.find("]]>") {
            out.push_str(&rest[..pos + 2]);
            out.push_str("]]>");
            rest = &rest[pos + 2..];
        } else {
            out.push_str(rest);
            out.push_str("]]>");
            break;
        }
    }
}
