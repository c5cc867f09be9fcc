//! Document tree node types.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::raw::RawNode;
use crate::error::{Error, Result};

/// Type names with a dedicated [`Node`] variant.
pub const BUILTIN_KINDS: &[&str] = &[
    "document",
    "section",
    "paragraph",
    "bullet_list",
    "enumerated_list",
    "definition_list",
    "list_item",
    "line",
    "line_block",
    "literal_block",
    "block_quote",
    "transition",
    "interpreted_text",
    "text",
    "emphasis",
    "strong",
    "literal",
];

/// A node in a parsed reStructuredText document tree.
///
/// Composite variants own their children and leaf variants own their text,
/// so a node can never carry both. Node types the renderer has no rule for
/// are kept as [`Node::Unknown`] together with their raw type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    /// Document root
    Document(Vec<Node>),

    /// A titled section
    Section {
        /// Heading level (1 = top)
        depth: u32,
        /// Inline content of the section title
        title: Vec<Node>,
        /// Body elements following the title
        children: Vec<Node>,
    },

    /// A paragraph of inline content
    Paragraph(Vec<Node>),

    /// Unordered list
    BulletList(Vec<Node>),

    /// Ordered list
    EnumeratedList(Vec<Node>),

    /// Term/definition list
    DefinitionList(Vec<Node>),

    /// Item of a bullet or enumerated list
    ListItem(Vec<Node>),

    /// Single line inside a line block
    Line(Vec<Node>),

    /// Block of lines with preserved line breaks
    LineBlock(Vec<Node>),

    /// Preformatted text
    LiteralBlock(Vec<Node>),

    /// Indented quotation
    BlockQuote(Vec<Node>),

    /// Horizontal separator between sections
    Transition,

    /// Text with an optional interpretation role
    InterpretedText {
        /// Role name, e.g. `math` or `code`
        role: Option<String>,
        /// Inline content
        children: Vec<Node>,
    },

    /// Raw text
    Text(String),

    /// Emphasized inline text
    Emphasis(Vec<Node>),

    /// Strongly emphasized inline text
    Strong(Vec<Node>),

    /// Inline literal
    Literal(Vec<Node>),

    /// A node type with no dedicated rendering rule
    Unknown {
        /// Raw node type name
        kind: UnknownKind,
        /// Node payload
        content: Content,
    },
}

/// Type name of a [`Node::Unknown`].
///
/// Never one of [`BUILTIN_KINDS`], so an unknown node reads back from its
/// JSON form as the same unknown node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnknownKind(String);

impl UnknownKind {
    /// Validate a type name, rejecting built-in ones.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if BUILTIN_KINDS.contains(&name.as_str()) {
            return Err(Error::invalid_tree(format!(
                "`{}` is a built-in node type, not an unknown one",
                name
            )));
        }
        Ok(Self(name))
    }

    /// Get the type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for UnknownKind {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnknownKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a node whose type is not known to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Child nodes
    Children(Vec<Node>),
    /// Raw text value
    Value(String),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Create a document root.
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document(children)
    }

    /// Create a section with the given title content and body.
    pub fn section(depth: u32, title: Vec<Node>, children: Vec<Node>) -> Self {
        Node::Section {
            depth,
            title,
            children,
        }
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(children)
    }

    /// Create a paragraph holding a single text node.
    pub fn paragraph_text(value: impl Into<String>) -> Self {
        Node::Paragraph(vec![Node::text(value)])
    }

    /// Create an interpreted text node.
    pub fn interpreted(role: Option<&str>, children: Vec<Node>) -> Self {
        Node::InterpretedText {
            role: role.map(str::to_string),
            children,
        }
    }

    /// Create an unknown composite node.
    ///
    /// Fails with [`Error::InvalidTree`] for built-in type names.
    pub fn unknown(kind: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        Ok(Node::Unknown {
            kind: UnknownKind::new(kind)?,
            content: Content::Children(children),
        })
    }

    /// Create an unknown leaf node.
    ///
    /// Fails with [`Error::InvalidTree`] for built-in type names.
    pub fn unknown_leaf(kind: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Ok(Node::Unknown {
            kind: UnknownKind::new(kind)?,
            content: Content::Value(value.into()),
        })
    }

    /// Build a composite node from its type name.
    ///
    /// Names without a dedicated variant become [`Node::Unknown`].
    /// `section`, `text` and `transition` cannot be built from children
    /// alone and are rejected.
    pub fn composite(kind: &str, children: Vec<Node>) -> Result<Self> {
        let node = match kind {
            "document" => Node::Document(children),
            "paragraph" => Node::Paragraph(children),
            "bullet_list" => Node::BulletList(children),
            "enumerated_list" => Node::EnumeratedList(children),
            "definition_list" => Node::DefinitionList(children),
            "list_item" => Node::ListItem(children),
            "line" => Node::Line(children),
            "line_block" => Node::LineBlock(children),
            "literal_block" => Node::LiteralBlock(children),
            "block_quote" => Node::BlockQuote(children),
            "emphasis" => Node::Emphasis(children),
            "strong" => Node::Strong(children),
            "literal" => Node::Literal(children),
            "interpreted_text" => Node::InterpretedText {
                role: None,
                children,
            },
            other => return Node::unknown(other, children),
        };
        Ok(node)
    }

    /// Get the type name of this node as used in the wire format.
    pub fn kind(&self) -> &str {
        match self {
            Node::Document(_) => "document",
            Node::Section { .. } => "section",
            Node::Paragraph(_) => "paragraph",
            Node::BulletList(_) => "bullet_list",
            Node::EnumeratedList(_) => "enumerated_list",
            Node::DefinitionList(_) => "definition_list",
            Node::ListItem(_) => "list_item",
            Node::Line(_) => "line",
            Node::LineBlock(_) => "line_block",
            Node::LiteralBlock(_) => "literal_block",
            Node::BlockQuote(_) => "block_quote",
            Node::Transition => "transition",
            Node::InterpretedText { .. } => "interpreted_text",
            Node::Text(_) => "text",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::Literal(_) => "literal",
            Node::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// Get the child nodes, or `None` for leaves.
    ///
    /// For sections this is the body only; the title is available through
    /// [`Node::title`].
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document(c)
            | Node::Paragraph(c)
            | Node::BulletList(c)
            | Node::EnumeratedList(c)
            | Node::DefinitionList(c)
            | Node::ListItem(c)
            | Node::Line(c)
            | Node::LineBlock(c)
            | Node::LiteralBlock(c)
            | Node::BlockQuote(c)
            | Node::Emphasis(c)
            | Node::Strong(c)
            | Node::Literal(c) => Some(c),
            Node::Section { children, .. } | Node::InterpretedText { children, .. } => {
                Some(children)
            }
            Node::Unknown {
                content: Content::Children(c),
                ..
            } => Some(c),
            Node::Text(_)
            | Node::Transition
            | Node::Unknown {
                content: Content::Value(_),
                ..
            } => None,
        }
    }

    /// Get the title content of a section.
    pub fn title(&self) -> Option<&[Node]> {
        match self {
            Node::Section { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Get the raw text of a leaf node.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Text(v)
            | Node::Unknown {
                content: Content::Value(v),
                ..
            } => Some(v),
            _ => None,
        }
    }

    /// Check if this node is a leaf (carries no children).
    pub fn is_leaf(&self) -> bool {
        self.children().is_none()
    }

    /// Get the concatenated text of all leaves below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(value) = self.value() {
            out.push_str(value);
            return;
        }
        for child in self.title().into_iter().flatten() {
            child.collect_text(out);
        }
        for child in self.children().into_iter().flatten() {
            child.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Node::text("a").kind(), "text");
        assert_eq!(Node::Transition.kind(), "transition");
        assert_eq!(
            Node::composite("block_quote", vec![]).unwrap().kind(),
            "block_quote"
        );
        assert_eq!(Node::unknown("footnote", vec![]).unwrap().kind(), "footnote");
    }

    #[test]
    fn test_builtin_names_are_not_unknown() {
        for kind in BUILTIN_KINDS {
            assert!(matches!(
                Node::unknown(*kind, vec![]),
                Err(Error::InvalidTree(_))
            ));
            assert!(Node::unknown_leaf(*kind, "x").is_err());
            assert!(UnknownKind::new(*kind).is_err());
        }
        assert_eq!(UnknownKind::new("title").unwrap().as_str(), "title");
    }

    #[test]
    fn test_composite_builtin_names() {
        assert_eq!(
            Node::composite("interpreted_text", vec![]).unwrap(),
            Node::interpreted(None, vec![])
        );
        assert!(Node::composite("section", vec![]).is_err());
        assert!(Node::composite("text", vec![]).is_err());
        assert!(Node::composite("transition", vec![]).is_err());
    }

    #[test]
    fn test_composite_unknown_name() {
        let node = Node::composite("definition_list_item", vec![Node::text("x")]).unwrap();
        assert!(matches!(
            node,
            Node::Unknown {
                content: Content::Children(_),
                ..
            }
        ));
    }

    #[test]
    fn test_children_and_value_are_exclusive() {
        let leaf = Node::text("hello");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.value(), Some("hello"));

        let para = Node::paragraph_text("hello");
        assert!(!para.is_leaf());
        assert_eq!(para.value(), None);
        assert_eq!(para.children().map(<[Node]>::len), Some(1));

        assert!(Node::Transition.is_leaf());
        assert_eq!(Node::Transition.value(), None);
    }

    #[test]
    fn test_section_children_exclude_title() {
        let section = Node::section(
            1,
            vec![Node::text("Title")],
            vec![Node::paragraph_text("Body")],
        );
        assert_eq!(section.children().map(<[Node]>::len), Some(1));
        assert_eq!(section.title().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_plain_text() {
        let doc = Node::document(vec![Node::section(
            1,
            vec![Node::text("Title")],
            vec![Node::paragraph(vec![
                Node::text("a "),
                Node::Strong(vec![Node::text("b")]),
                Node::unknown_leaf("substitution", " c").unwrap(),
            ])],
        )]);
        assert_eq!(doc.plain_text(), "Titlea b c");
    }
}
