//! The tolerant HTML parsing state machine.
//!
//! A single scanning cursor walks the input once, driven by an explicit
//! state enum. A "current node" cursor always points at the innermost open
//! element awaiting closure (starting at the document root); start tags
//! push it, end tags and the recovery rules pop it.
//!
//! The machine recovers locally from the damage real-world HTML carries:
//! void elements auto-close, optional end tags (`<td>`, `<tr>`, ...) are
//! implied by sibling-compatible start tags or an ancestor's close,
//! unquoted attribute values are scanned heuristically, and end-of-input
//! with open elements finishes leniently. Conditions with no safe recovery
//! (unterminated comment/CDATA/doctype, junk where a tag name is required,
//! an irreconcilable end tag) abort with a status and offset, leaving the
//! already-built prefix a valid tree.

use strum_macros::Display;

use quokka_common::warning::warn_once;
use quokka_dom::{Document, NodeId};

use super::helpers::{is_symbol_byte, is_whitespace_byte};
use crate::entities;
use crate::error::{ParseOutcome, ParseStatus};
use crate::options::ParseOptions;
use crate::tags;

/// The parser state machine states, one per construct of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParserState {
    /// Accumulating character data until `<` or end of input.
    Text,
    /// Just after `<`: decide between start tag, end tag, `<!`, `<?`.
    TagOpen,
    /// Scanning a start tag: name, attributes, closure.
    StartTag,
    /// Scanning an end tag after `</`.
    EndTag,
    /// Scanning `<!...>` content: comment, CDATA, or doctype.
    Exclamation,
    /// Scanning `<?...?>` content: declaration or processing instruction.
    Question,
}

/// How a start tag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagClosure {
    /// Plain `>`: the element is open (unless it is a void element).
    Open,
    /// `/>`: the element never becomes the current node.
    SelfClosed,
}

/// The parser: input buffer, scanning cursor, the document under
/// construction, and the current-node cursor.
pub struct HtmlParser {
    pub(super) state: ParserState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) doc: Document,
    pub(super) cursor: NodeId,
    pub(super) options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser for the given input.
    #[must_use]
    pub fn new(input: String, options: ParseOptions) -> Self {
        let doc = Document::new();
        let cursor = doc.root();
        Self {
            state: ParserState::Text,
            input,
            current_pos: 0,
            doc,
            cursor,
            options,
        }
    }

    /// Run the parser to completion and return the document plus the
    /// outcome.
    ///
    /// The document is returned in every case; on a hard error it holds
    /// the valid prefix built before the failure, and the outcome carries
    /// the status and the byte offset where parsing stopped.
    #[must_use]
    pub fn run(mut self) -> (Document, ParseOutcome) {
        let status = match self.run_states() {
            Ok(()) => ParseStatus::Ok,
            Err(status) => status,
        };
        let outcome = ParseOutcome {
            status,
            offset: self.current_pos,
        };
        (self.doc, outcome)
    }

    /// The dispatch loop. Ends in the `Text` state at end of input;
    /// elements still open at that point are treated as closed.
    fn run_states(&mut self) -> Result<(), ParseStatus> {
        while self.current_pos < self.input.len() || self.state != ParserState::Text {
            match self.state {
                ParserState::Text => self.handle_text()?,
                ParserState::TagOpen => self.handle_tag_open()?,
                ParserState::StartTag => self.handle_start_tag()?,
                ParserState::EndTag => self.handle_end_tag()?,
                ParserState::Exclamation => self.handle_exclamation()?,
                ParserState::Question => self.handle_question()?,
            }
        }
        Ok(())
    }

    /// Text state: accumulate until `<` or end of input. Pure-whitespace
    /// runs are discarded unless whitespace preservation is on.
    fn handle_text(&mut self) -> Result<(), ParseStatus> {
        let start = self.current_pos;
        let end = self.find_from_cursor("<").unwrap_or(self.input.len());
        let raw = &self.input[start..end];
        if !raw.is_empty() {
            let all_whitespace = raw.bytes().all(is_whitespace_byte);
            if !all_whitespace || self.options.parse_whitespace_pcdata {
                let value = entities::decode_pcdata(raw, &self.options);
                let text = self.doc.alloc_text(&value);
                let _ = self.doc.append_child(self.cursor, text);
            }
        }
        self.current_pos = end;
        if self.current_pos < self.input.len() {
            self.consume_bytes(1); // '<'
            self.state = ParserState::TagOpen;
        }
        Ok(())
    }

    /// Just after `<`: dispatch on the next character.
    fn handle_tag_open(&mut self) -> Result<(), ParseStatus> {
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                self.state = ParserState::StartTag;
                Ok(())
            }
            Some(b'/') => {
                self.consume_bytes(1);
                self.state = ParserState::EndTag;
                Ok(())
            }
            Some(b'!') => {
                self.consume_bytes(1);
                self.state = ParserState::Exclamation;
                Ok(())
            }
            Some(b'?') => {
                self.consume_bytes(1);
                self.state = ParserState::Question;
                Ok(())
            }
            _ => Err(ParseStatus::UnrecognizedTag),
        }
    }

    /// Start tag: scan the name, apply optional-end-tag recovery, attach
    /// the element, scan attributes, and decide whether it stays open.
    fn handle_start_tag(&mut self) -> Result<(), ParseStatus> {
        let name = self.scan_symbol_upper();
        if name.is_empty() {
            return Err(ParseStatus::BadStartElement);
        }

        self.close_optional_siblings(&name);

        let element = self.doc.alloc_element(&name);
        let _ = self.doc.append_child(self.cursor, element);

        let closure = match self.peek() {
            Some(b'>') => {
                self.consume_bytes(1);
                TagClosure::Open
            }
            Some(b'/') => {
                self.consume_bytes(1);
                if self.consume_if(b'>') {
                    TagClosure::SelfClosed
                } else {
                    return Err(ParseStatus::BadStartElement);
                }
            }
            Some(b) if is_whitespace_byte(b) => self.parse_attributes(element)?,
            _ => return Err(ParseStatus::BadStartElement),
        };

        // Void elements auto-close: the tag never becomes the cursor, so
        // no matching end tag is required.
        if closure == TagClosure::Open && !tags::is_void_element(&name) {
            self.cursor = element;
        }
        self.state = ParserState::Text;
        Ok(())
    }

    /// Implicitly close dangling optional-end-tag elements a new start tag
    /// is sibling-compatible with (`<td>col1<td>` — the second cell ends
    /// the first).
    fn close_optional_siblings(&mut self, incoming: &str) {
        loop {
            let open = self.doc.name(self.cursor).to_string();
            if !tags::has_optional_end_tag(&open) || !tags::closes_optional_sibling(&open, incoming)
            {
                break;
            }
            warn_once(
                "HTML Parser",
                &format!("implicitly closed <{open}> before <{incoming}>"),
            );
            let Some(parent) = self.doc.parent(self.cursor) else {
                break;
            };
            self.cursor = parent;
        }
    }

    /// The attribute loop inside a start tag, after the first whitespace.
    fn parse_attributes(&mut self, element: NodeId) -> Result<TagClosure, ParseStatus> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseStatus::BadStartElement),
                Some(b'>') => {
                    self.consume_bytes(1);
                    return Ok(TagClosure::Open);
                }
                Some(b'/') => {
                    self.consume_bytes(1);
                    if self.consume_if(b'>') {
                        return Ok(TagClosure::SelfClosed);
                    }
                    return Err(ParseStatus::BadStartElement);
                }
                Some(b) if is_symbol_byte(b) => {
                    let name = self.scan_symbol_upper();
                    self.skip_whitespace();
                    let value = if self.consume_if(b'=') {
                        self.skip_whitespace();
                        self.parse_attribute_value()?
                    } else {
                        String::new()
                    };
                    let _ = self.doc.append_attribute(element, &name, &value);
                }
                Some(_) => return Err(ParseStatus::BadAttribute),
            }
        }
    }

    /// An attribute value after `=`. Quoted values scan to the matching
    /// quote; a missing quote is recovered by scanning to the next
    /// whitespace, `>`, or tag-closing `/>`.
    fn parse_attribute_value(&mut self) -> Result<String, ParseStatus> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.consume_bytes(1);
                let needle = char::from(quote).to_string();
                let end = self
                    .find_from_cursor(&needle)
                    .ok_or(ParseStatus::BadAttribute)?;
                let raw = &self.input[self.current_pos..end];
                let value = entities::decode_attribute(raw, &self.options);
                self.current_pos = end + 1;
                Ok(value)
            }
            Some(_) => {
                let start = self.current_pos;
                while let Some(b) = self.peek() {
                    if is_whitespace_byte(b) || b == b'>' {
                        break;
                    }
                    // A slash only terminates the value when it closes the
                    // tag; mid-value slashes (unquoted URLs) are content.
                    if b == b'/' && self.input.as_bytes().get(self.current_pos + 1) == Some(&b'>')
                    {
                        break;
                    }
                    self.advance_char();
                }
                let raw = &self.input[start..self.current_pos];
                warn_once(
                    "HTML Parser",
                    &format!("recovered unquoted attribute value \"{raw}\""),
                );
                Ok(entities::decode_attribute(raw, &self.options))
            }
            None => Err(ParseStatus::BadStartElement),
        }
    }

    /// End tag after `</`: close the current node on an exact match,
    /// otherwise climb through optional-end-tag elements before giving up.
    fn handle_end_tag(&mut self) -> Result<(), ParseStatus> {
        let name = self.scan_symbol_upper();
        if name.is_empty() {
            return Err(ParseStatus::BadEndElement);
        }
        self.skip_whitespace();
        if !self.consume_if(b'>') {
            return Err(ParseStatus::BadEndElement);
        }

        loop {
            if self.cursor == self.doc.root() {
                return Err(ParseStatus::EndElementMismatch);
            }
            let open = self.doc.name(self.cursor).to_string();
            let parent = self.doc.parent(self.cursor).unwrap_or(self.doc.root());
            if open == name {
                self.cursor = parent;
                break;
            }
            if tags::has_optional_end_tag(&open) {
                warn_once(
                    "HTML Parser",
                    &format!("implicitly closed <{open}> before </{name}>"),
                );
                self.cursor = parent;
                continue;
            }
            return Err(ParseStatus::EndElementMismatch);
        }
        self.state = ParserState::Text;
        Ok(())
    }

    /// `<!...`: comment, CDATA section, or doctype.
    fn handle_exclamation(&mut self) -> Result<(), ParseStatus> {
        if self.starts_with(b"--") {
            self.consume_bytes(2);
            let end = self.find_from_cursor("-->").ok_or(ParseStatus::BadComment)?;
            let raw = self.input[self.current_pos..end].to_string();
            self.current_pos = end + 3;
            if self.options.parse_comments {
                // Comment content keeps entities literal; only line
                // endings are normalized.
                let literal = self.options.clone().with_escapes(false);
                let value = entities::decode_pcdata(&raw, &literal);
                let node = self.doc.alloc_comment(&value);
                let _ = self.doc.append_child(self.cursor, node);
            }
        } else if self.starts_with(b"[CDATA[") {
            self.consume_bytes(7);
            let end = self.find_from_cursor("]]>").ok_or(ParseStatus::BadCData)?;
            let raw = self.input[self.current_pos..end].to_string();
            self.current_pos = end + 3;
            if self.options.parse_cdata {
                let literal = self.options.clone().with_escapes(false);
                let value = entities::decode_pcdata(&raw, &literal);
                let node = self.doc.alloc_cdata(&value);
                let _ = self.doc.append_child(self.cursor, node);
            }
        } else if self.starts_with_ignore_case(b"DOCTYPE") {
            self.consume_bytes(7);
            let value = self.scan_doctype()?;
            if self.options.parse_doctype {
                if self.cursor == self.doc.root() {
                    let node = self.doc.alloc_doctype(&value);
                    let _ = self.doc.append_child(self.cursor, node);
                } else {
                    warn_once("HTML Parser", "ignored doctype below document scope");
                }
            }
        } else {
            return Err(ParseStatus::UnrecognizedTag);
        }
        self.state = ParserState::Text;
        Ok(())
    }

    /// `<?...?>`: a declaration when the target is `xml`, otherwise a
    /// processing instruction with raw content.
    fn handle_question(&mut self) -> Result<(), ParseStatus> {
        let target = self.scan_symbol_upper();
        if target.is_empty() {
            return Err(ParseStatus::BadProcessingInstruction);
        }
        let end = self
            .find_from_cursor("?>")
            .ok_or(ParseStatus::BadProcessingInstruction)?;
        let raw = self.input[self.current_pos..end].trim().to_string();
        self.current_pos = end + 2;

        if target == "XML" {
            if self.options.parse_declaration {
                let attributes = parse_declaration_attributes(&raw, &self.options)?;
                let node = self.doc.alloc_declaration(&target);
                for attr in &attributes {
                    let _ = self.doc.append_attribute(node, &attr.0, &attr.1);
                }
                if !self.doc.append_child(self.cursor, node) {
                    warn_once("HTML Parser", "ignored declaration below document scope");
                }
            }
        } else if self.options.parse_pi {
            let node = self.doc.alloc_pi(&target, &raw);
            let _ = self.doc.append_child(self.cursor, node);
        }
        self.state = ParserState::Text;
        Ok(())
    }
}

/// Parse `name="value"` pairs out of a declaration body
/// (`version="1.0" encoding="UTF-8"`). Names are upper-cased like every
/// other name.
fn parse_declaration_attributes(
    raw: &str,
    options: &ParseOptions,
) -> Result<Vec<(String, String)>, ParseStatus> {
    let bytes = raw.as_bytes();
    let mut pos = 0;
    let mut attributes = Vec::new();
    while pos < bytes.len() {
        while pos < bytes.len() && is_whitespace_byte(bytes[pos]) {
            pos += 1;
        }
        if pos == bytes.len() {
            break;
        }
        let name_start = pos;
        while pos < bytes.len() && is_symbol_byte(bytes[pos]) {
            pos += 1;
        }
        if pos == name_start {
            return Err(ParseStatus::BadProcessingInstruction);
        }
        let name = raw[name_start..pos].to_ascii_uppercase();
        while pos < bytes.len() && is_whitespace_byte(bytes[pos]) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            return Err(ParseStatus::BadProcessingInstruction);
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace_byte(bytes[pos]) {
            pos += 1;
        }
        let Some(&quote) = bytes.get(pos).filter(|b| matches!(b, b'"' | b'\'')) else {
            return Err(ParseStatus::BadProcessingInstruction);
        };
        pos += 1;
        let value_start = pos;
        while pos < bytes.len() && bytes[pos] != quote {
            pos += 1;
        }
        if pos == bytes.len() {
            return Err(ParseStatus::BadProcessingInstruction);
        }
        let value = entities::decode_attribute(&raw[value_start..pos], options);
        pos += 1;
        attributes.push((name, value));
    }
    Ok(attributes)
}
