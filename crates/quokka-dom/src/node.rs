//! Node records stored in the document arena.
//!
//! Every node lives in the owning [`Document`](crate::Document)'s arena and
//! is addressed by a [`NodeId`]. Parent and sibling relationships are
//! expressed as optional ids, so the tree is a single ownership graph: the
//! document owns every node, and the links never own anything.

/// A type-safe index into the document's node arena.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues. Absent nodes (failed lookups, missing siblings) are expressed as
/// `Option<NodeId>` rather than a sentinel "null node" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A name/value pair owned by exactly one element or declaration node.
///
/// Attribute names are upper-cased by the parser. Attribute lists preserve
/// insertion order and permit duplicate names; nothing deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name (upper-cased on parse).
    pub name: String,
    /// Attribute value (entity-decoded on parse when escapes are enabled).
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Element-specific data: tag name plus the ordered attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, upper-cased on parse (`DIV`, `BR`, ...).
    pub tag_name: String,
    /// Ordered attribute list; duplicates are preserved.
    pub attributes: Vec<Attribute>,
}

impl ElementData {
    /// Create element data with the given tag name and no attributes.
    #[must_use]
    pub const fn new(tag_name: String) -> Self {
        Self {
            tag_name,
            attributes: Vec::new(),
        }
    }
}

/// Processing-instruction data: target name plus raw content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PiData {
    /// PI target, upper-cased on parse.
    pub target: String,
    /// Raw content between the target and the closing `?>`.
    pub value: String,
}

/// Declaration data (`<?xml version="1.0"?>`): target plus attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationData {
    /// Declaration target; `XML` after case normalization.
    pub target: String,
    /// Ordered attribute list (`version`, `encoding`, ...).
    pub attributes: Vec<Attribute>,
}

/// The closed set of node kinds a document tree can contain.
///
/// Payload-bearing variants own their textual data directly. There is no
/// null kind: absent nodes are `Option<NodeId>`, and attributes are not
/// nodes but [`Attribute`] values owned by their element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The unique tree root. Never a child of anything.
    Document,
    /// An element (`<div>...</div>`), the only other kind with children.
    Element(ElementData),
    /// Parsed character data — plain text content.
    Text(String),
    /// A `<![CDATA[...]]>` section, taken literally.
    CData(String),
    /// A `<!-- ... -->` comment.
    Comment(String),
    /// A `<?target ...?>` processing instruction.
    ProcessingInstruction(PiData),
    /// An XML-style declaration (`<?xml ...?>`).
    Declaration(DeclarationData),
    /// A `<!DOCTYPE ...>` node; the payload is the trimmed doctype content.
    Doctype(String),
}

impl NodeKind {
    /// The node's name: tag name for elements, target for PI/declaration,
    /// empty for every other kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Element(data) => &data.tag_name,
            Self::ProcessingInstruction(data) => &data.target,
            Self::Declaration(data) => &data.target,
            _ => "",
        }
    }

    /// The node's textual payload: text/CDATA/comment/doctype content, PI
    /// content, empty for every other kind.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Text(value) | Self::CData(value) | Self::Comment(value) | Self::Doctype(value) => {
                value
            }
            Self::ProcessingInstruction(data) => &data.value,
            _ => "",
        }
    }

    /// The node's attribute list; empty for kinds that cannot carry
    /// attributes.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::Element(data) => &data.attributes,
            Self::Declaration(data) => &data.attributes,
            _ => &[],
        }
    }

    /// Mutable access to the attribute list, for the kinds that have one
    /// (elements and declarations).
    pub fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match self {
            Self::Element(data) => Some(&mut data.attributes),
            Self::Declaration(data) => Some(&mut data.attributes),
            _ => None,
        }
    }

    /// True for the kinds that may contain children (document and element).
    #[must_use]
    pub const fn allows_children(&self) -> bool {
        matches!(self, Self::Document | Self::Element(_))
    }

    /// True if this is an element node.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// True for the text-bearing kinds (PCDATA and CDATA).
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_) | Self::CData(_))
    }
}

/// A node record in the arena.
///
/// Child lists are doubly linked through the arena with explicit head/tail
/// pointers, so append, prepend, last-child access, and unlink-by-handle
/// are all O(1) while forward iteration stays a simple `next_sibling` walk.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is, plus its payload.
    pub kind: NodeKind,
    /// Non-owning back-reference; `None` only for the document root and
    /// detached nodes.
    pub parent: Option<NodeId>,
    /// Head of the child list.
    pub first_child: Option<NodeId>,
    /// Tail of the child list.
    pub last_child: Option<NodeId>,
    /// Previous sibling in the parent's child list.
    pub prev_sibling: Option<NodeId>,
    /// Next sibling in the parent's child list.
    pub next_sibling: Option<NodeId>,
}

impl Node {
    /// Create a detached node of the given kind.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// The node's name (see [`NodeKind::name`]).
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// The node's textual payload (see [`NodeKind::value`]).
    #[must_use]
    pub fn value(&self) -> &str {
        self.kind.value()
    }

    /// The node's attribute list (see [`NodeKind::attributes`]).
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        self.kind.attributes()
    }
}
