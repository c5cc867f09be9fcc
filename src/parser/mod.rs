//! reStructuredText parsing module.
//!
//! The renderer only needs a [`Node`] tree; [`DocumentParser`] is the seam
//! through which trees are produced, either from markup ([`RstParser`]) or
//! from JSON emitted by another parser ([`JsonTreeParser`]).

mod block;
mod inline;
mod lines;
mod options;
mod rst_parser;

use crate::error::Result;
use crate::model::Node;

pub use options::{ErrorMode, ParseOptions};
pub use rst_parser::{JsonTreeParser, RstParser};

/// Source of document trees.
pub trait DocumentParser {
    /// Parse a source string into a document tree.
    fn parse(&self, source: &str) -> Result<Node>;
}
