//! Rendering options and configuration.

/// Options for rendering document trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces added per nesting level of block elements
    pub indent_width: usize,

    /// Render independent documents on the rayon thread pool
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Enable or disable parallel batch rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render batches one document at a time.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            parallel: true,
        }
    }
}
