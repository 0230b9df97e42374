//! Tolerant HTML parsing for the quokka engine.
//!
//! A single-pass state-machine parser that turns real-world HTML — tag
//! soup included — into a [`quokka_dom::Document`]. Recoverable damage
//! (void elements, omitted optional end tags, unquoted attribute values,
//! truncated input) is repaired in place; unrecoverable damage stops the
//! parse with a [`ParseStatus`] and byte offset while keeping the tree
//! built so far valid.
//!
//! ```
//! use quokka_html::parse;
//!
//! let (doc, outcome) = parse("<html><body><p>Hi</p></body></html>");
//! assert!(outcome.is_ok());
//! let body = doc.first_element_by_path(doc.root(), "HTML/BODY", '/');
//! assert!(body.is_some());
//! ```

mod entities;

/// Parse status and outcome types.
pub mod error;
/// Parse option flags.
pub mod options;
/// The parsing state machine.
pub mod parser;
/// Element classification tables (void elements, optional end tags).
pub mod tags;

pub use error::{ParseOutcome, ParseStatus};
pub use options::ParseOptions;
pub use parser::{parse, parse_with_options, HtmlParser, ParserState};
