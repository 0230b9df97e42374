//! Shared diagnostics for the Quokka HTML toolkit.
//!
//! The parser recovers from a lot of real-world markup damage (unclosed
//! tags, unquoted attribute values, stray end tags). Recoveries are
//! reported here rather than through the parse status, so embedding
//! applications can keep an eye on what the leniency is papering over.

pub mod warning;
