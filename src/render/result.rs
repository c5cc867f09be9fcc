//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::NodeStats;

/// Result of rendering a document, including the HTML and tree statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// Statistics of the rendered tree
    pub stats: NodeStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, stats: NodeStats) -> Self {
        Self { html, stats }
    }

    /// Create a result with just HTML.
    pub fn html_only(html: String) -> Self {
        Self {
            html,
            stats: NodeStats::default(),
        }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}
