//! Parse status reporting.
//!
//! Errors with a well-defined tolerant recovery (void elements, optional
//! end tags, unquoted attribute values, end-of-input with open elements)
//! never surface here; the parser recovers and continues. A non-`Ok`
//! status means parsing stopped at `offset`, leaving the already-built
//! prefix of the tree valid but incomplete.

use std::fmt;

use thiserror::Error;

/// The status a parse (or a loading front end) can report.
///
/// `FileNotFound` and `IoError` are produced by file-loading front ends,
/// never by the parser itself; `OutOfMemory` is reserved for
/// fallible-allocation front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseStatus {
    /// No error.
    #[error("no error")]
    Ok,
    /// File was not found during load.
    #[error("file was not found")]
    FileNotFound,
    /// Error reading from a file or stream.
    #[error("error reading from file or stream")]
    IoError,
    /// Could not allocate memory.
    #[error("could not allocate memory")]
    OutOfMemory,
    /// Internal parser consistency failure.
    #[error("internal error")]
    InternalError,
    /// Could not determine the tag type after `<`.
    #[error("could not determine tag type")]
    UnrecognizedTag,
    /// Error parsing a processing instruction or declaration.
    #[error("error parsing processing instruction")]
    BadProcessingInstruction,
    /// Error parsing a comment.
    #[error("error parsing comment")]
    BadComment,
    /// Error parsing a CDATA section.
    #[error("error parsing CDATA section")]
    BadCData,
    /// Error parsing a document type declaration.
    #[error("error parsing document type declaration")]
    BadDoctype,
    /// Error parsing character data.
    #[error("error parsing PCDATA section")]
    BadPcdata,
    /// Error parsing a start element tag.
    #[error("error parsing start element tag")]
    BadStartElement,
    /// Error parsing an element attribute.
    #[error("error parsing element attribute")]
    BadAttribute,
    /// Error parsing an end element tag.
    #[error("error parsing end element tag")]
    BadEndElement,
    /// A closing tag that cannot be reconciled with any enclosing
    /// optional or void element.
    #[error("start-end tags mismatch")]
    EndElementMismatch,
}

/// The result of a parse: a status plus the byte offset into the input
/// where parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOutcome {
    /// What happened.
    pub status: ParseStatus,
    /// Byte offset into the input buffer where parsing stopped or failed.
    pub offset: usize,
}

impl ParseOutcome {
    /// True if parsing completed without a hard error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, ParseStatus::Ok)
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.status, self.offset)
    }
}
