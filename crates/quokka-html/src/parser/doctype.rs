//! Doctype scanning.
//!
//! Doctype content is a bracket soup of its own: quoted strings, comments,
//! processing instructions, `<![...]]>` ignore sections (which nest with
//! sections of their own kind), and `<!...>` groups (which nest with
//! everything). The scanner consumes the whole construct balanced through
//! the matching `>` and returns the trimmed interior; it never builds
//! structure out of it.

use super::core::HtmlParser;
use crate::error::ParseStatus;

impl HtmlParser {
    /// Scan doctype content after the `DOCTYPE` keyword, consuming through
    /// the matching `>`. Unterminated input is a hard error.
    pub(super) fn scan_doctype(&mut self) -> Result<String, ParseStatus> {
        let start = self.current_pos;
        loop {
            match self.peek() {
                None => return Err(ParseStatus::BadDoctype),
                Some(b'"' | b'\'') => self.scan_doctype_quoted()?,
                Some(b'<') => self.scan_doctype_markup()?,
                Some(b'>') => {
                    let content = self.input[start..self.current_pos].trim().to_string();
                    self.consume_bytes(1);
                    return Ok(content);
                }
                Some(_) => self.advance_char(),
            }
        }
    }

    /// A quoted string; the quote character at the cursor delimits it.
    fn scan_doctype_quoted(&mut self) -> Result<(), ParseStatus> {
        let Some(quote) = self.peek() else {
            return Err(ParseStatus::BadDoctype);
        };
        self.consume_bytes(1);
        loop {
            match self.peek() {
                None => return Err(ParseStatus::BadDoctype),
                Some(b) if b == quote => {
                    self.consume_bytes(1);
                    return Ok(());
                }
                Some(_) => self.advance_char(),
            }
        }
    }

    /// Markup inside a doctype, dispatched on the prefix at the cursor
    /// (which is on `<`). A `<` that opens nothing recognizable is plain
    /// content.
    fn scan_doctype_markup(&mut self) -> Result<(), ParseStatus> {
        if self.starts_with(b"<!--") {
            self.consume_bytes(4);
            self.scan_doctype_terminated("-->")
        } else if self.starts_with(b"<?") {
            self.consume_bytes(2);
            self.scan_doctype_terminated("?>")
        } else if self.starts_with(b"<![") {
            self.consume_bytes(3);
            self.scan_doctype_ignore()
        } else if self.starts_with(b"<!") {
            self.consume_bytes(2);
            self.scan_doctype_group()
        } else {
            self.consume_bytes(1);
            Ok(())
        }
    }

    /// A primitive group: skip to its fixed terminator.
    fn scan_doctype_terminated(&mut self, terminator: &str) -> Result<(), ParseStatus> {
        let end = self
            .find_from_cursor(terminator)
            .ok_or(ParseStatus::BadDoctype)?;
        self.current_pos = end + terminator.len();
        Ok(())
    }

    /// An ignore section `<![ ... ]]>`; only sections of the same kind
    /// nest inside it.
    fn scan_doctype_ignore(&mut self) -> Result<(), ParseStatus> {
        let mut depth = 0_usize;
        loop {
            if self.starts_with(b"<![") {
                self.consume_bytes(3);
                depth += 1;
            } else if self.starts_with(b"]]>") {
                self.consume_bytes(3);
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            } else if self.peek().is_some() {
                self.advance_char();
            } else {
                return Err(ParseStatus::BadDoctype);
            }
        }
    }

    /// A control group `<! ... >`; everything nests inside it.
    fn scan_doctype_group(&mut self) -> Result<(), ParseStatus> {
        loop {
            match self.peek() {
                None => return Err(ParseStatus::BadDoctype),
                Some(b'"' | b'\'') => self.scan_doctype_quoted()?,
                Some(b'<') => self.scan_doctype_markup()?,
                Some(b'>') => {
                    self.consume_bytes(1);
                    return Ok(());
                }
                Some(_) => self.advance_char(),
            }
        }
    }
}
