//! Depth-first traversal protocol.
//!
//! Consumers implement [`TreeWalker`] to visit a subtree in pre-order.
//! Traversal is iterative, so tree depth never grows the call stack.

use crate::document::Document;
use crate::node::NodeId;

/// A visitor for depth-first pre-order traversal of a subtree.
///
/// `begin` and `end` bracket the traversal with the traversal root;
/// `for_each` is called for every descendant with its depth (the root's
/// children are at depth 0). Returning false from `begin` or `for_each`
/// aborts the traversal immediately.
pub trait TreeWalker {
    /// Called once with the traversal root before any descendant.
    /// Returning false aborts the traversal.
    fn begin(&mut self, doc: &Document, node: NodeId) -> bool {
        let _ = (doc, node);
        true
    }

    /// Called for every descendant in pre-order with its depth.
    /// Returning false aborts the traversal.
    fn for_each(&mut self, doc: &Document, node: NodeId, depth: usize) -> bool;

    /// Called once with the traversal root after the last descendant.
    /// The return value becomes the traversal result.
    fn end(&mut self, doc: &Document, node: NodeId) -> bool {
        let _ = (doc, node);
        true
    }
}

impl Document {
    /// Traverse the subtree below `root` with the given walker.
    ///
    /// Calls `walker.begin(root)`, then `walker.for_each(node, depth)` for
    /// every descendant in pre-order, then `walker.end(root)`. Returns
    /// false as soon as `begin` or any `for_each` returns false; otherwise
    /// returns the result of `end`.
    pub fn traverse(&self, root: NodeId, walker: &mut impl TreeWalker) -> bool {
        if !walker.begin(self, root) {
            return false;
        }
        let mut depth: usize = 0;
        let mut cur = self.first_child(root);
        while let Some(node) = cur {
            if !walker.for_each(self, node, depth) {
                return false;
            }
            if let Some(child) = self.first_child(node) {
                depth += 1;
                cur = Some(child);
            } else {
                let mut climb = node;
                cur = loop {
                    if let Some(sibling) = self.next_sibling(climb) {
                        break Some(sibling);
                    }
                    match self.parent(climb) {
                        Some(parent) if parent != root => {
                            climb = parent;
                            depth -= 1;
                        }
                        _ => break None,
                    }
                };
            }
        }
        walker.end(self, root)
    }
}
