//! Document parsers.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{Node, NodeStats, RawNode};

use super::block::BlockParser;
use super::lines::split_lines;
use super::{DocumentParser, ParseOptions};

/// reStructuredText parser.
#[derive(Debug, Clone, Default)]
pub struct RstParser {
    options: ParseOptions,
}

impl RstParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Read and parse a UTF-8 file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Node> {
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }
}

impl DocumentParser for RstParser {
    fn parse(&self, source: &str) -> Result<Node> {
        let lines = split_lines(source, self.options.tab_width);
        let document = BlockParser::new(&self.options).parse_document(&lines)?;

        log::debug!(
            "Parsed {} lines into {} nodes",
            lines.len(),
            NodeStats::collect(&document).node_count
        );
        Ok(document)
    }
}

/// Parser for document trees already serialized as JSON.
///
/// Accepts the `type`/`children`/`value` shape produced by external
/// reStructuredText parsers and validates it on the way in.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl JsonTreeParser {
    /// Create a new JSON tree parser.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for JsonTreeParser {
    fn parse(&self, source: &str) -> Result<Node> {
        let raw: RawNode = serde_json::from_str(source)?;
        Node::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_rst_parser_document_root() {
        let doc = RstParser::new().parse("Hello\n").unwrap();
        assert_eq!(doc, Node::document(vec![Node::paragraph_text("Hello\n")]));
    }

    #[test]
    fn test_rst_parser_tab_width() {
        let parser = RstParser::with_options(ParseOptions::new().with_tab_width(4));
        let doc = parser.parse("::\n\n\tx\n\t\ty\n").unwrap();
        assert_eq!(
            doc,
            Node::document(vec![Node::LiteralBlock(vec![Node::text("x\n    y\n")])])
        );
    }

    #[test]
    fn test_json_tree_parser() {
        let doc = JsonTreeParser::new()
            .parse(r#"{"type":"document","children":[{"type":"transition"}]}"#)
            .unwrap();
        assert_eq!(doc, Node::document(vec![Node::Transition]));
    }

    #[test]
    fn test_json_tree_parser_rejects_bad_shape() {
        let err = JsonTreeParser::new()
            .parse(r#"{"type":"text","children":[]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTree(_)));

        let err = JsonTreeParser::new().parse("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parsers_behind_trait_object() {
        let parsers: Vec<Box<dyn DocumentParser>> =
            vec![Box::new(RstParser::new()), Box::new(JsonTreeParser::new())];
        assert!(parsers[0].parse("text").is_ok());
        assert!(parsers[1].parse("text").is_err());
    }
}
