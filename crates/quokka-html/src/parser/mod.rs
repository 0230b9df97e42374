//! The HTML parser.
//!
//! [`parse`] and [`parse_with_options`] are the front doors: they run the
//! state machine over a string and always hand back a document, paired
//! with a [`ParseOutcome`](crate::error::ParseOutcome) that says whether
//! the whole input was consumed and, if not, where things went wrong.

/// The state machine itself.
pub mod core;

mod doctype;
mod helpers;

pub use self::core::{HtmlParser, ParserState};

use quokka_dom::Document;

use crate::error::ParseOutcome;
use crate::options::ParseOptions;

/// Parse HTML with the default options.
#[must_use]
pub fn parse(input: &str) -> (Document, ParseOutcome) {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse HTML with the given options.
#[must_use]
pub fn parse_with_options(input: &str, options: &ParseOptions) -> (Document, ParseOutcome) {
    HtmlParser::new(input.to_string(), options.clone()).run()
}
