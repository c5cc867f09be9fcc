//! # rst2html
//!
//! Render reStructuredText documents to HTML with semantic class names.
//!
//! Every element carries an `rst-*` class (`rst-paragraph`, `rst-title-1`,
//! `rst-bullet-list`, ...) so the output can be styled without touching
//! the markup. Node types without a dedicated rule are rendered as
//! `<div class="rst-unknown rst-{type}">`, so any tree renders.
//!
//! ## Quick Start
//!
//! ```
//! let html = rst2html::render_to_html("Title\n=====\n\nHello.\n", 2)?;
//! assert!(html.contains("<h1 class=\"rst-title-1\">"));
//! # Ok::<(), rst2html::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Stable output**: indentation and line breaks are part of the contract
//! - **External trees**: render JSON trees produced by other parsers
//! - **Batch rendering**: uses Rayon for independent documents
//! - **C ABI**: optional `ffi` feature for embedding

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Content, Node, NodeStats, RawNode, UnknownKind};
pub use parser::{DocumentParser, ErrorMode, JsonTreeParser, ParseOptions, RstParser};
pub use render::{HtmlRenderer, JsonFormat, RenderOptions, RenderResult};

use std::path::Path;

use rayon::prelude::*;

/// Parse reStructuredText into a document tree.
///
/// # Example
///
/// ```
/// use rst2html::{parse, Node};
///
/// let doc = parse("Hello\n").unwrap();
/// assert!(matches!(doc, Node::Document(_)));
/// ```
pub fn parse(source: &str) -> Result<Node> {
    RstParser::new().parse(source)
}

/// Parse reStructuredText with custom options.
///
/// # Example
///
/// ```
/// use rst2html::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// assert!(parse_with_options("Long title\n-----\n", &options).is_err());
/// ```
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Node> {
    RstParser::with_options(options.clone()).parse(source)
}

/// Read and parse a reStructuredText file.
///
/// ```no_run
/// let doc = rst2html::parse_file("README.rst").unwrap();
/// println!("{}", doc.plain_text());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    RstParser::new().parse_file(path)
}

/// Render reStructuredText source to HTML.
///
/// `indent_width` is the number of spaces per nesting level of block
/// elements. Only strict-mode parse errors can occur; rendering itself
/// never fails.
pub fn render_to_html(source: &str, indent_width: usize) -> Result<String> {
    let doc = parse(source)?;
    Ok(render::to_html(
        &doc,
        &RenderOptions::default().with_indent(indent_width),
    ))
}

/// Render an already built document tree.
pub fn render_tree(node: &Node, options: &RenderOptions) -> String {
    render::to_html(node, options)
}

/// Render a document tree given as JSON.
///
/// # Example
///
/// ```
/// use rst2html::{render_json_tree, RenderOptions};
///
/// let json = r#"{"type":"text","value":"hi\n"}"#;
/// let html = render_json_tree(json, &RenderOptions::default()).unwrap();
/// assert_eq!(html, "<span class=\"rst-text\">hi</span>");
/// ```
pub fn render_json_tree(json: &str, options: &RenderOptions) -> Result<String> {
    let doc = JsonTreeParser::new().parse(json)?;
    Ok(render::to_html(&doc, options))
}

/// Read a reStructuredText file and render it to HTML.
pub fn render_file<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_html(&doc, options))
}

/// Render many independent sources.
///
/// Results keep the order of `sources`. Runs on the Rayon thread pool
/// unless [`RenderOptions::parallel`] is off.
pub fn render_batch<S>(
    sources: &[S],
    parse_options: &ParseOptions,
    options: &RenderOptions,
) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    let parser = RstParser::with_options(parse_options.clone());
    let render_one = |source: &S| -> Result<String> {
        let doc = parser.parse(source.as_ref())?;
        Ok(render::to_html(&doc, options))
    };

    log::debug!(
        "Rendering {} documents ({})",
        sources.len(),
        if options.parallel { "parallel" } else { "sequential" }
    );

    if options.parallel {
        sources.par_iter().map(render_one).collect()
    } else {
        sources.iter().map(render_one).collect()
    }
}

/// Render a document tree and collect its statistics.
pub fn render_with_stats(node: &Node, options: &RenderOptions) -> RenderResult {
    RenderResult::new(render::to_html(node, options), NodeStats::collect(node))
}

/// Builder for parsing and rendering documents.
///
/// # Example
///
/// ```
/// use rst2html::Rst2Html;
///
/// let html = Rst2Html::new()
///     .with_indent(4)
///     .strict()
///     .parse("Hello\n")?
///     .to_html();
/// assert!(html.starts_with("<div class=\"rst-document\">\n    <p"));
/// # Ok::<(), rst2html::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rst2Html {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Rst2Html {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.render_options = self.render_options.with_indent(width);
        self
    }

    /// Enable strict parsing mode.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the tab width.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.parse_options = self.parse_options.with_tab_width(width);
        self
    }

    /// Disable parallel batch rendering.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Parse reStructuredText source.
    pub fn parse(self, source: &str) -> Result<Rst2HtmlResult> {
        let document = RstParser::with_options(self.parse_options).parse(source)?;
        Ok(Rst2HtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a reStructuredText file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<Rst2HtmlResult> {
        let document = RstParser::with_options(self.parse_options).parse_file(path)?;
        Ok(Rst2HtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load a document tree serialized as JSON.
    pub fn parse_json(self, json: &str) -> Result<Rst2HtmlResult> {
        let document = JsonTreeParser::new().parse(json)?;
        Ok(Rst2HtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Render many sources with this builder's options.
    pub fn render_batch<S: AsRef<str> + Sync>(&self, sources: &[S]) -> Vec<Result<String>> {
        render_batch(sources, &self.parse_options, &self.render_options)
    }
}

/// Result of parsing a document.
#[derive(Debug, Clone)]
pub struct Rst2HtmlResult {
    /// The parsed document
    pub document: Node,
    /// Render options to use
    render_options: RenderOptions,
}

impl Rst2HtmlResult {
    /// Render to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.document, &self.render_options)
    }

    /// Serialize the tree to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Collect node statistics.
    pub fn stats(&self) -> NodeStats {
        NodeStats::collect(&self.document)
    }

    /// Render to HTML together with statistics.
    pub fn render_with_stats(&self) -> RenderResult {
        render_with_stats(&self.document, &self.render_options)
    }

    /// Get the document.
    pub fn document(&self) -> &Node {
        &self.document
    }
}
