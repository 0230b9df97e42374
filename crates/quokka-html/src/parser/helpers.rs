//! Cursor primitives for the parser.
//!
//! The parser scans a UTF-8 buffer with a byte-offset cursor. Everything
//! the grammar dispatches on is ASCII, so the helpers work on bytes; the
//! cursor is only ever left on a character boundary, which keeps the
//! string slices taken for names, values, and content safe.

use super::core::HtmlParser;

impl HtmlParser {
    /// The byte at the cursor, if any.
    pub(super) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.current_pos).copied()
    }

    /// True if the input at the cursor starts with the given ASCII bytes.
    pub(super) fn starts_with(&self, pattern: &[u8]) -> bool {
        self.input.as_bytes()[self.current_pos..].starts_with(pattern)
    }

    /// ASCII case-insensitive variant of [`HtmlParser::starts_with`].
    pub(super) fn starts_with_ignore_case(&self, pattern: &[u8]) -> bool {
        let rest = &self.input.as_bytes()[self.current_pos..];
        rest.len() >= pattern.len() && rest[..pattern.len()].eq_ignore_ascii_case(pattern)
    }

    /// Advance the cursor past one character (UTF-8 aware).
    pub(super) fn advance_char(&mut self) {
        let rest = &self.input[self.current_pos..];
        if let Some(c) = rest.chars().next() {
            self.current_pos += c.len_utf8();
        }
    }

    /// Advance past the given number of ASCII bytes.
    /// Caller must have verified they are present.
    pub(super) const fn consume_bytes(&mut self, count: usize) {
        self.current_pos += count;
    }

    /// If the byte at the cursor is `expected`, consume it.
    pub(super) fn consume_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current_pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip ASCII whitespace (space, tab, CR, LF, FF).
    pub(super) fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace_byte(b) {
                self.current_pos += 1;
            } else {
                break;
            }
        }
    }

    /// Scan a symbol run (tag or attribute name) and return it
    /// upper-cased. Empty if the cursor is not on a symbol character.
    pub(super) fn scan_symbol_upper(&mut self) -> String {
        let start = self.current_pos;
        while let Some(b) = self.peek() {
            if is_symbol_byte(b) {
                self.current_pos += 1;
            } else {
                break;
            }
        }
        self.input[start..self.current_pos].to_ascii_uppercase()
    }

    /// Find `needle` at or after the cursor; returns its absolute byte
    /// offset.
    pub(super) fn find_from_cursor(&self, needle: &str) -> Option<usize> {
        self.input[self.current_pos..]
            .find(needle)
            .map(|pos| self.current_pos + pos)
    }
}

/// ASCII whitespace: space, tab, LF, CR, FF.
pub(super) const fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

/// Symbol characters: the run a tag or attribute name is made of.
pub(super) const fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'-' | b'_' | b'.')
}
