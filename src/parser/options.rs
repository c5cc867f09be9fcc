//! Parsing options and configuration.

/// Options for parsing reStructuredText sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Column stop distance used when expanding tabs
    pub tab_width: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (reject questionable markup).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (warn and keep going).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the tab width.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// Check if strict mode is enabled.
    pub fn is_strict(&self) -> bool {
        self.error_mode == ErrorMode::Strict
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            tab_width: 8,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on questionable markup
    Strict,
    /// Log a warning and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().strict().with_tab_width(4);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.tab_width, 4);
        assert!(options.is_strict());
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.tab_width, 8);
        assert!(!options.is_strict());
    }

    #[test]
    fn test_tab_width_minimum() {
        let options = ParseOptions::new().with_tab_width(0);
        assert_eq!(options.tab_width, 1);
    }
}
