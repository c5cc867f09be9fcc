//! JSON export of document trees.

use crate::error::{Error, Result};
use crate::model::Node;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document tree to its wire JSON form.
pub fn to_json(node: &Node, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(node),
        JsonFormat::Compact => serde_json::to_string(node),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
