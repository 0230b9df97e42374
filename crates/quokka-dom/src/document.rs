//! The arena-backed document tree.
//!
//! A [`Document`] stores every node of one tree in a contiguous vector and
//! addresses them with [`NodeId`] indices. This provides:
//! - O(1) access to any node by `NodeId`
//! - O(1) append/prepend/unlink and O(1) first/last child access
//! - No borrowing issues (indices instead of references)
//!
//! Dropping the document destroys the whole tree. Nodes removed from their
//! parent stay in the arena but become unreachable from the root.

use crate::node::{
    Attribute, DeclarationData, ElementData, Node, NodeId, NodeKind, PiData,
};

/// A document tree: the unique root node plus the arena that owns every
/// node reachable from it.
///
/// All tree operations are methods on the document taking `NodeId`
/// arguments. Lookups that find nothing return `None` or an empty string;
/// structural mutations that would violate the containment rules return
/// `false` and leave the tree untouched.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl Document {
    /// Create a new document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena (including detached ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Factories
    // =========================================================================

    /// Allocate a new detached node of the given kind and return its ID.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached element with the given tag name.
    pub fn alloc_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag_name.to_string())))
    }

    /// Allocate a detached text (PCDATA) node.
    pub fn alloc_text(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Text(value.to_string()))
    }

    /// Allocate a detached CDATA node.
    pub fn alloc_cdata(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::CData(value.to_string()))
    }

    /// Allocate a detached comment node.
    pub fn alloc_comment(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Comment(value.to_string()))
    }

    /// Allocate a detached processing-instruction node.
    pub fn alloc_pi(&mut self, target: &str, value: &str) -> NodeId {
        self.alloc(NodeKind::ProcessingInstruction(PiData {
            target: target.to_string(),
            value: value.to_string(),
        }))
    }

    /// Allocate a detached declaration node with the given target and no
    /// attributes.
    pub fn alloc_declaration(&mut self, target: &str) -> NodeId {
        self.alloc(NodeKind::Declaration(DeclarationData {
            target: target.to_string(),
            attributes: Vec::new(),
        }))
    }

    /// Allocate a detached doctype node.
    pub fn alloc_doctype(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Doctype(value.to_string()))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The kind of a node. The root is always `NodeKind::Document`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// The node's name: tag name for elements, target for PI/declaration
    /// nodes, empty string for every other kind (and for unknown ids).
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::name)
    }

    /// The node's textual payload; empty string when the kind has none.
    #[must_use]
    pub fn value(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::value)
    }

    /// Replace the textual payload of a text/CDATA/comment/doctype/PI node.
    /// Returns false for kinds without a payload.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(
                NodeKind::Text(v)
                | NodeKind::CData(v)
                | NodeKind::Comment(v)
                | NodeKind::Doctype(v),
            ) => {
                value.clone_into(v);
                true
            }
            Some(NodeKind::ProcessingInstruction(data)) => {
                value.clone_into(&mut data.value);
                true
            }
            _ => false,
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Scan forward from a node for the next sibling with the given name.
    #[must_use]
    pub fn next_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut cur = self.next_sibling(id);
        while let Some(sib) = cur {
            if self.name(sib) == name {
                return Some(sib);
            }
            cur = self.next_sibling(sib);
        }
        None
    }

    /// Scan backward from a node for the previous sibling with the given
    /// name.
    #[must_use]
    pub fn prev_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut cur = self.prev_sibling(id);
        while let Some(sib) = cur {
            if self.name(sib) == name {
                return Some(sib);
            }
            cur = self.prev_sibling(sib);
        }
        None
    }

    /// Iterate over the children of a node in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> ChildIterator<'_> {
        ChildIterator {
            doc: self,
            current: self.first_child(id),
        }
    }

    /// First child with the given name (exact match), if any.
    #[must_use]
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.name(c) == name)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            doc: self,
            current: self.parent(id),
        }
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    /// Append `child` as the last child of `parent`. O(1).
    ///
    /// Returns false (and leaves the tree untouched) for disallowed
    /// combinations: a parent that cannot contain children, a document node
    /// as child, a declaration/doctype under a non-document parent, or a
    /// child that is already attached somewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.link_allowed(parent, child) {
            return false;
        }
        let prev_last = self.nodes[parent.0].last_child;
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            node.prev_sibling = prev_last;
            node.next_sibling = None;
        }
        if let Some(last) = prev_last {
            self.nodes[last.0].next_sibling = Some(child);
        } else {
            self.nodes[parent.0].first_child = Some(child);
        }
        self.nodes[parent.0].last_child = Some(child);
        true
    }

    /// Insert `child` as the first child of `parent`. O(1).
    ///
    /// Same containment rules as [`Document::append_child`].
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.link_allowed(parent, child) {
            return false;
        }
        let prev_first = self.nodes[parent.0].first_child;
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            node.prev_sibling = None;
            node.next_sibling = prev_first;
        }
        if let Some(first) = prev_first {
            self.nodes[first.0].prev_sibling = Some(child);
        } else {
            self.nodes[parent.0].last_child = Some(child);
        }
        self.nodes[parent.0].first_child = Some(child);
        true
    }

    /// Unlink `child` from `parent`. O(1) given the handle.
    ///
    /// The node stays in the arena but is no longer reachable from the
    /// root. Returns false if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        let (prev, next) = {
            let node = &self.nodes[child.0];
            (node.prev_sibling, node.next_sibling)
        };
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        } else {
            self.nodes[parent.0].first_child = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        } else {
            self.nodes[parent.0].last_child = prev;
        }
        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        true
    }

    /// Unlink the first child of `parent` with the given name. O(n).
    pub fn remove_child_by_name(&mut self, parent: NodeId, name: &str) -> bool {
        match self.child(parent, name) {
            Some(child) => self.remove_child(parent, child),
            None => false,
        }
    }

    /// Containment rules shared by append/prepend.
    fn link_allowed(&self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || child == NodeId::ROOT {
            return false;
        }
        let (Some(parent_node), Some(child_node)) = (self.get(parent), self.get(child)) else {
            return false;
        };
        if !parent_node.kind.allows_children() || child_node.parent.is_some() {
            return false;
        }
        match child_node.kind {
            NodeKind::Document => false,
            // Declarations and doctypes only make sense at document level.
            NodeKind::Declaration(_) | NodeKind::Doctype(_) => {
                matches!(parent_node.kind, NodeKind::Document)
            }
            _ => true,
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// The node's attribute list; empty for kinds without attributes.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.get(id).map_or(&[], Node::attributes)
    }

    /// The first attribute of a node. O(1).
    #[must_use]
    pub fn first_attribute(&self, id: NodeId) -> Option<&Attribute> {
        self.attributes(id).first()
    }

    /// The last attribute of a node. O(1).
    #[must_use]
    pub fn last_attribute(&self, id: NodeId) -> Option<&Attribute> {
        self.attributes(id).last()
    }

    /// The value of the first attribute with the given name. O(n).
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// First attribute satisfying the predicate. O(n).
    #[must_use]
    pub fn find_attribute(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(&Attribute) -> bool,
    ) -> Option<&Attribute> {
        self.attributes(id).iter().find(|a| predicate(a))
    }

    /// Append an attribute. O(1).
    ///
    /// Returns `None` without changing anything if the node kind cannot
    /// carry attributes (anything but element/declaration). Duplicate names
    /// are allowed.
    pub fn append_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Option<&mut Attribute> {
        let attrs = self.nodes.get_mut(id.0)?.kind.attributes_mut()?;
        attrs.push(Attribute::new(name.to_string(), value.to_string()));
        attrs.last_mut()
    }

    /// Insert an attribute at the front of the list.
    ///
    /// Same kind restrictions as [`Document::append_attribute`].
    pub fn prepend_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Option<&mut Attribute> {
        let attrs = self.nodes.get_mut(id.0)?.kind.attributes_mut()?;
        attrs.insert(0, Attribute::new(name.to_string(), value.to_string()));
        attrs.first_mut()
    }

    /// Remove the first attribute with the given name. O(n).
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(attrs) = self.nodes.get_mut(id.0).and_then(|n| n.kind.attributes_mut()) else {
            return false;
        };
        match attrs.iter().position(|a| a.name == name) {
            Some(index) => {
                let _ = attrs.remove(index);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Content queries
    // =========================================================================

    /// The value of the first text or CDATA child; empty string if none.
    #[must_use]
    pub fn child_value(&self, id: NodeId) -> &str {
        self.children(id)
            .find(|&c| self.nodes[c.0].kind.is_text())
            .map_or("", |c| self.nodes[c.0].value())
    }

    /// The [`Document::child_value`] of the first child with the given name.
    #[must_use]
    pub fn child_value_named(&self, id: NodeId, name: &str) -> &str {
        self.child(id, name)
            .map_or("", |child| self.child_value(child))
    }

    /// Concatenate the value of every text/CDATA descendant, depth-first,
    /// left-to-right. Empty string for nodes with no text descendants.
    ///
    /// Iterative: tree depth does not grow the call stack.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        let mut cur = self.first_child(id);
        while let Some(node) = cur {
            if self.nodes[node.0].kind.is_text() {
                result.push_str(self.nodes[node.0].value());
            }
            cur = self.next_pre_order(id, node);
        }
        result
    }

    /// First child satisfying the predicate (immediate children only). O(n).
    /// The predicate may carry mutable state (counters, collectors).
    #[must_use]
    pub fn find_child(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(&Node) -> bool,
    ) -> Option<NodeId> {
        self.children(id).find(|&c| predicate(&self.nodes[c.0]))
    }

    /// Depth-first pre-order search over the subtree below `id` (`id`
    /// itself is not visited). Returns the first node satisfying the
    /// predicate.
    ///
    /// Iterative: visit a node, then its first child; if none, its next
    /// sibling; if none, climb until a next sibling is found or the search
    /// root is re-reached.
    #[must_use]
    pub fn find_node(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(&Node) -> bool,
    ) -> Option<NodeId> {
        let mut cur = self.first_child(id);
        while let Some(node) = cur {
            if predicate(&self.nodes[node.0]) {
                return Some(node);
            }
            cur = self.next_pre_order(id, node);
        }
        None
    }

    /// First immediate child (optionally restricted to `tag`) owning an
    /// attribute with this exact name/value pair.
    #[must_use]
    pub fn find_child_by_attribute(
        &self,
        id: NodeId,
        tag: Option<&str>,
        attr_name: &str,
        attr_value: &str,
    ) -> Option<NodeId> {
        self.children(id).find(|&c| {
            let node = &self.nodes[c.0];
            if let Some(tag) = tag
                && node.name() != tag
            {
                return false;
            }
            node.attributes()
                .iter()
                .any(|a| a.name == attr_name && a.value == attr_value)
        })
    }

    /// Successor of `cur` in a pre-order walk of the subtree rooted at
    /// `root`, or `None` when the walk is exhausted.
    fn next_pre_order(&self, root: NodeId, cur: NodeId) -> Option<NodeId> {
        if let Some(child) = self.first_child(cur) {
            return Some(child);
        }
        let mut node = cur;
        while node != root {
            if let Some(sibling) = self.next_sibling(node) {
                return Some(sibling);
            }
            node = self.parent(node)?;
        }
        None
    }

    // =========================================================================
    // Paths
    // =========================================================================

    /// The delimiter-joined chain of ancestor names from the root to this
    /// node, root name first. The document root contributes its empty name,
    /// so paths of attached nodes lead with the delimiter.
    #[must_use]
    pub fn path(&self, id: NodeId, delimiter: char) -> String {
        let mut names: Vec<&str> = Vec::new();
        let mut cur = Some(id);
        while let Some(node) = cur {
            names.push(self.name(node));
            cur = self.parent(node);
        }
        names.reverse();
        names.join(&delimiter.to_string())
    }

    /// Resolve a `.`/`..`/name path relative to this node (absolute if the
    /// path starts with the delimiter). Returns `None` if any segment fails
    /// to resolve; name segments resolve to the first matching child.
    #[must_use]
    pub fn first_element_by_path(
        &self,
        id: NodeId,
        path: &str,
        delimiter: char,
    ) -> Option<NodeId> {
        let mut cur = if path.starts_with(delimiter) {
            self.root()
        } else {
            id
        };
        for segment in path.split(delimiter) {
            cur = match segment {
                "" | "." => cur,
                ".." => self.parent(cur)?,
                name => self.child(cur, name)?,
            };
        }
        Some(cur)
    }

    // =========================================================================
    // Document-wide queries
    // =========================================================================

    /// All elements with the given tag name, in document order.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let root = self.root();
        let mut cur = self.first_child(root);
        while let Some(node) = cur {
            if self.nodes[node.0].kind.is_element() && self.name(node) == name {
                out.push(node);
            }
            cur = self.next_pre_order(root, node);
        }
        out
    }

    /// The first element anywhere in the tree whose `ID` attribute equals
    /// the given value.
    #[must_use]
    pub fn get_element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.find_node(self.root(), |node| {
            node.kind.is_element()
                && node
                    .attributes()
                    .iter()
                    .any(|a| a.name == "ID" && a.value == id_value)
        })
    }

    /// All `A` and `AREA` elements, in document order.
    #[must_use]
    pub fn links(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let root = self.root();
        let mut cur = self.first_child(root);
        while let Some(node) = cur {
            if self.nodes[node.0].kind.is_element()
                && matches!(self.name(node), "A" | "AREA")
            {
                out.push(node);
            }
            cur = self.next_pre_order(root, node);
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node, in insertion order.
pub struct ChildIterator<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.next_sibling(id);
        Some(id)
    }
}

/// Iterator over the ancestors of a node, from parent to root.
pub struct AncestorIterator<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.parent(id);
        Some(id)
    }
}

/// Print a subtree to stdout, indented two spaces per level. Debug aid for
/// the CLI and tests.
pub fn print_tree(doc: &Document, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = doc.get(id) else {
        return;
    };
    match &node.kind {
        NodeKind::Document => println!("{prefix}Document"),
        NodeKind::Element(data) => {
            if data.attributes.is_empty() {
                println!("{prefix}<{}>", data.tag_name);
            } else {
                let attrs: Vec<String> = data
                    .attributes
                    .iter()
                    .map(|a| {
                        if a.value.is_empty() {
                            a.name.clone()
                        } else {
                            format!("{}=\"{}\"", a.name, a.value)
                        }
                    })
                    .collect();
                println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeKind::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            println!("{prefix}\"{display}\"");
        }
        NodeKind::CData(data) => println!("{prefix}<![CDATA[{data}]]>"),
        NodeKind::Comment(data) => println!("{prefix}<!-- {data} -->"),
        NodeKind::ProcessingInstruction(data) => {
            println!("{prefix}<?{} {}?>", data.target, data.value);
        }
        NodeKind::Declaration(data) => println!("{prefix}<?{}?>", data.target),
        NodeKind::Doctype(data) => println!("{prefix}<!DOCTYPE {data}>"),
    }
    for child in doc.children(id) {
        print_tree(doc, child, indent + 1);
    }
}
