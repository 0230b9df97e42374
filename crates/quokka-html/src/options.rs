//! Parse options.
//!
//! Each flag selects whether an optional construct is materialized in the
//! tree or how textual content is normalized. Constructs that are not
//! materialized are still scanned and validated, just not added.

/// Options controlling what the parser materializes and how it normalizes
/// text.
///
/// The default enables CDATA sections, entity decoding, end-of-line
/// normalization, and attribute whitespace conversion; [`ParseOptions::full`]
/// additionally materializes processing instructions, comments,
/// declarations, and doctypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Materialize processing-instruction nodes.
    pub parse_pi: bool,
    /// Materialize comment nodes.
    pub parse_comments: bool,
    /// Materialize CDATA nodes.
    pub parse_cdata: bool,
    /// Keep text runs that consist entirely of whitespace.
    pub parse_whitespace_pcdata: bool,
    /// Decode entity references (`&amp;`, `&#65;`, ...) in text and
    /// attribute values.
    pub parse_escapes: bool,
    /// Normalize `\r\n` and lone `\r` to `\n` in text and attribute
    /// values.
    pub parse_eol: bool,
    /// Convert tab/CR/LF to spaces inside attribute values (CDATA
    /// attribute normalization).
    pub parse_wconv_attribute: bool,
    /// Trim attribute values and collapse internal whitespace runs to
    /// single spaces (NMTOKEN normalization; takes precedence over
    /// conversion).
    pub parse_wnorm_attribute: bool,
    /// Materialize declaration nodes (`<?xml ...?>`).
    pub parse_declaration: bool,
    /// Materialize doctype nodes.
    pub parse_doctype: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parse_pi: false,
            parse_comments: false,
            parse_cdata: true,
            parse_whitespace_pcdata: false,
            parse_escapes: true,
            parse_eol: true,
            parse_wconv_attribute: true,
            parse_wnorm_attribute: false,
            parse_declaration: false,
            parse_doctype: false,
        }
    }
}

impl ParseOptions {
    /// Every flag off: the fastest mode, building elements, attributes,
    /// and raw text only.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            parse_pi: false,
            parse_comments: false,
            parse_cdata: false,
            parse_whitespace_pcdata: false,
            parse_escapes: false,
            parse_eol: false,
            parse_wconv_attribute: false,
            parse_wnorm_attribute: false,
            parse_declaration: false,
            parse_doctype: false,
        }
    }

    /// The default set plus processing instructions, comments,
    /// declarations, and doctypes.
    #[must_use]
    pub fn full() -> Self {
        Self {
            parse_pi: true,
            parse_comments: true,
            parse_declaration: true,
            parse_doctype: true,
            ..Self::default()
        }
    }

    /// Set whether processing instructions are materialized.
    #[must_use]
    pub const fn with_pi(mut self, yes: bool) -> Self {
        self.parse_pi = yes;
        self
    }

    /// Set whether comments are materialized.
    #[must_use]
    pub const fn with_comments(mut self, yes: bool) -> Self {
        self.parse_comments = yes;
        self
    }

    /// Set whether CDATA sections are materialized.
    #[must_use]
    pub const fn with_cdata(mut self, yes: bool) -> Self {
        self.parse_cdata = yes;
        self
    }

    /// Set whether whitespace-only text runs are kept.
    #[must_use]
    pub const fn with_whitespace_pcdata(mut self, yes: bool) -> Self {
        self.parse_whitespace_pcdata = yes;
        self
    }

    /// Set whether entity references are decoded.
    #[must_use]
    pub const fn with_escapes(mut self, yes: bool) -> Self {
        self.parse_escapes = yes;
        self
    }

    /// Set whether end-of-line sequences are normalized.
    #[must_use]
    pub const fn with_eol(mut self, yes: bool) -> Self {
        self.parse_eol = yes;
        self
    }

    /// Set whether attribute values get whitespace conversion.
    #[must_use]
    pub const fn with_wconv_attribute(mut self, yes: bool) -> Self {
        self.parse_wconv_attribute = yes;
        self
    }

    /// Set whether attribute values get whitespace collapsing.
    #[must_use]
    pub const fn with_wnorm_attribute(mut self, yes: bool) -> Self {
        self.parse_wnorm_attribute = yes;
        self
    }

    /// Set whether declarations are materialized.
    #[must_use]
    pub const fn with_declaration(mut self, yes: bool) -> Self {
        self.parse_declaration = yes;
        self
    }

    /// Set whether doctypes are materialized.
    #[must_use]
    pub const fn with_doctype(mut self, yes: bool) -> Self {
        self.parse_doctype = yes;
        self
    }
}
