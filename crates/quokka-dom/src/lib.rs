//! Arena-based DOM tree and serializer for the Quokka HTML toolkit.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Child lists are doubly linked through the arena with
//! explicit head/tail pointers, so append, prepend, and last-child access
//! are all O(1); attribute lists are insertion-ordered vectors that
//! permit duplicate names.
//!
//! The [`serializer`] module re-emits a tree as markup text with the
//! escaping rules HTML round-tripping needs; [`walker`] provides the
//! depth-first traversal protocol.

/// The document tree and its operations.
pub mod document;
/// Node records, kinds, and attributes.
pub mod node;
/// Markup output with escaping rules.
pub mod serializer;
/// Depth-first traversal protocol.
pub mod walker;

pub use document::{AncestorIterator, ChildIterator, Document, print_tree};
pub use node::{Attribute, DeclarationData, ElementData, Node, NodeId, NodeKind, PiData};
pub use serializer::{SaveOptions, serialize, serialize_node};
pub use walker::TreeWalker;
