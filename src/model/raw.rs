//! Wire format of document trees.
//!
//! Trees are exchanged as JSON objects carrying a `type` tag plus optional
//! `children`, `value`, `depth` and `role` fields, the shape produced by the
//! `restructured` family of parsers. Converting a [`RawNode`] into a
//! [`Node`] checks the node shape contract once, at the boundary.

use serde::{Deserialize, Serialize};

use super::node::{Content, Node};
use crate::error::{Error, Result};

/// Untyped document tree node as found in JSON input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    /// Node type name
    #[serde(rename = "type")]
    pub kind: String,

    /// Heading level of sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    /// Role of interpreted text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Child nodes of composite nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,

    /// Text of leaf nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RawNode {
    fn composite(kind: &str, children: Vec<RawNode>) -> Self {
        Self {
            kind: kind.to_string(),
            children: Some(children),
            ..Default::default()
        }
    }
}

fn convert_all(children: Vec<RawNode>) -> Result<Vec<Node>> {
    children.into_iter().map(Node::try_from).collect()
}

fn require_children(kind: &str, children: Option<Vec<RawNode>>) -> Result<Vec<RawNode>> {
    children.ok_or_else(|| Error::invalid_tree(format!("`{}` node has no children", kind)))
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        let RawNode {
            kind,
            depth,
            role,
            children,
            value,
        } = raw;

        match kind.as_str() {
            "text" => value
                .map(Node::Text)
                .ok_or_else(|| Error::invalid_tree("`text` node has no value")),
            "transition" => Ok(Node::Transition),
            "section" => {
                let depth =
                    depth.ok_or_else(|| Error::invalid_tree("`section` node has no depth"))?;
                let mut children = require_children(&kind, children)?.into_iter();
                let title = children
                    .next()
                    .ok_or_else(|| Error::invalid_tree("`section` node has no title"))?;
                let title = require_children(&title.kind, title.children)?;
                Ok(Node::Section {
                    depth,
                    title: convert_all(title)?,
                    children: convert_all(children.collect())?,
                })
            }
            "interpreted_text" => Ok(Node::InterpretedText {
                role,
                children: convert_all(require_children(&kind, children)?)?,
            }),
            "document" | "paragraph" | "bullet_list" | "enumerated_list" | "definition_list"
            | "list_item" | "line" | "line_block" | "literal_block" | "block_quote"
            | "emphasis" | "strong" | "literal" => {
                Node::composite(&kind, convert_all(require_children(&kind, children)?)?)
            }
            _ => match (children, value) {
                (Some(children), _) => Node::unknown(kind, convert_all(children)?),
                (None, Some(value)) => Node::unknown_leaf(kind, value),
                (None, None) => Err(Error::invalid_tree(format!(
                    "`{}` node has neither children nor value",
                    kind
                ))),
            },
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let kind = node.kind().to_string();
        match node {
            Node::Text(value) => RawNode {
                kind,
                value: Some(value),
                ..Default::default()
            },
            Node::Transition => RawNode {
                kind,
                ..Default::default()
            },
            Node::Section {
                depth,
                title,
                children,
            } => {
                let mut raw_children = Vec::with_capacity(children.len() + 1);
                raw_children.push(RawNode::composite(
                    "title",
                    title.into_iter().map(RawNode::from).collect(),
                ));
                raw_children.extend(children.into_iter().map(RawNode::from));
                RawNode {
                    kind,
                    depth: Some(depth),
                    children: Some(raw_children),
                    ..Default::default()
                }
            }
            Node::InterpretedText { role, children } => RawNode {
                kind,
                role,
                children: Some(children.into_iter().map(RawNode::from).collect()),
                ..Default::default()
            },
            Node::Unknown {
                content: Content::Value(value),
                ..
            } => RawNode {
                kind,
                value: Some(value),
                ..Default::default()
            },
            Node::Unknown {
                content: Content::Children(children),
                ..
            }
            | Node::Document(children)
            | Node::Paragraph(children)
            | Node::BulletList(children)
            | Node::EnumeratedList(children)
            | Node::DefinitionList(children)
            | Node::ListItem(children)
            | Node::Line(children)
            | Node::LineBlock(children)
            | Node::LiteralBlock(children)
            | Node::BlockQuote(children)
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Literal(children) => {
                RawNode::composite(&kind, children.into_iter().map(RawNode::from).collect())
            }
        }
    }
}
