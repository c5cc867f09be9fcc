//! Node statistics collected over a document tree.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::node::{Content, Node};

/// Statistics about the nodes of a document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Number of nodes per wire type name
    pub counts: BTreeMap<String, u32>,

    /// Total number of nodes, section title wrappers included
    pub node_count: u32,

    /// Deepest nesting level reached (root = 0)
    pub max_depth: u32,

    /// Types rendered through the generic fallback
    pub fallback_kinds: BTreeSet<String>,
}

impl NodeStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a tree and collect its statistics.
    pub fn collect(root: &Node) -> Self {
        let mut stats = Self::new();
        stats.visit(root, 0);
        stats
    }

    fn record(&mut self, kind: &str, level: u32) {
        *self.counts.entry(kind.to_string()).or_insert(0) += 1;
        self.node_count += 1;
        self.max_depth = self.max_depth.max(level);
    }

    fn visit(&mut self, node: &Node, level: u32) {
        self.record(node.kind(), level);

        match node {
            Node::Section {
                title, children, ..
            } => {
                // The title renders as its own block one level down.
                self.record("title", level + 1);
                for child in title {
                    self.visit(child, level + 2);
                }
                for child in children {
                    self.visit(child, level + 1);
                }
            }
            Node::DefinitionList(children)
            | Node::Unknown {
                content: Content::Children(children),
                ..
            } => {
                self.fallback_kinds.insert(node.kind().to_string());
                for child in children {
                    self.visit(child, level + 1);
                }
            }
            Node::Transition
            | Node::Unknown {
                content: Content::Value(_),
                ..
            } => {
                self.fallback_kinds.insert(node.kind().to_string());
            }
            _ => {
                for child in node.children().into_iter().flatten() {
                    self.visit(child, level + 1);
                }
            }
        }
    }

    /// Get the number of nodes of the given type.
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Check if any node went through the generic fallback.
    pub fn has_fallbacks(&self) -> bool {
        !self.fallback_kinds.is_empty()
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &NodeStats) {
        for (kind, count) in &other.counts {
            *self.counts.entry(kind.clone()).or_insert(0) += count;
        }
        self.node_count += other.node_count;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.fallback_kinds
            .extend(other.fallback_kinds.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::document(vec![Node::section(
            1,
            vec![Node::text("Title")],
            vec![
                Node::paragraph_text("Body\n"),
                Node::Transition,
                Node::DefinitionList(vec![Node::unknown(
                    "definition_list_item",
                    vec![Node::unknown("term", vec![Node::text("t")]).unwrap()],
                )
                .unwrap()]),
            ],
        )])
    }

    #[test]
    fn test_collect_counts() {
        let stats = NodeStats::collect(&sample());

        assert_eq!(stats.count("document"), 1);
        assert_eq!(stats.count("section"), 1);
        assert_eq!(stats.count("title"), 1);
        assert_eq!(stats.count("text"), 3);
        assert_eq!(stats.count("footnote"), 0);
        assert_eq!(stats.node_count, 11);
    }

    #[test]
    fn test_collect_depth() {
        let stats = NodeStats::collect(&sample());
        // document > section > definition_list > item > term > text
        assert_eq!(stats.max_depth, 5);

        let stats = NodeStats::collect(&Node::text("x"));
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_fallback_kinds() {
        let stats = NodeStats::collect(&sample());
        let kinds: Vec<&str> = stats.fallback_kinds.iter().map(String::as_str).collect();
        assert_eq!(
            kinds,
            vec!["definition_list", "definition_list_item", "term", "transition"]
        );
        assert!(stats.has_fallbacks());

        let plain = NodeStats::collect(&Node::paragraph_text("x"));
        assert!(!plain.has_fallbacks());
    }

    #[test]
    fn test_merge() {
        let mut a = NodeStats::collect(&Node::paragraph_text("x"));
        let b = NodeStats::collect(&sample());
        a.merge(&b);

        assert_eq!(a.count("paragraph"), 2);
        assert_eq!(a.node_count, 13);
        assert_eq!(a.max_depth, 5);
        assert!(a.fallback_kinds.contains("transition"));
    }
}
