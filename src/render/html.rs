//! HTML rendering for document trees.
//!
//! Every element gets a semantic `rst-*` class. Block elements own their
//! indentation and sit on their own lines; inline elements and text leaves
//! are emitted without surrounding whitespace. Output whitespace is stable
//! and part of the public contract.

use crate::model::{Content, Node};

use super::RenderOptions;

/// Convert a document tree to HTML.
pub fn to_html(node: &Node, options: &RenderOptions) -> String {
    HtmlRenderer::new(options).render(node)
}

/// HTML renderer.
///
/// Holds only configuration, so rendering the same tree twice always
/// yields identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlRenderer {
    indent_width: usize,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            indent_width: options.indent_width,
        }
    }

    /// Get the number of spaces per nesting level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Render a tree rooted at level 0.
    pub fn render(&self, node: &Node) -> String {
        self.render_node(node, 0)
    }

    /// Render a node at the given nesting level.
    pub fn render_node(&self, node: &Node, level: usize) -> String {
        match node {
            Node::Document(children) => self.render_block("div", "rst-document", children, level),
            Node::Section {
                depth,
                title,
                children,
            } => self.render_section(*depth, title, children, level),
            Node::Paragraph(children) => self.render_block("p", "rst-paragraph", children, level),
            Node::BulletList(children) => {
                self.render_block("ul", "rst-bullet-list", children, level)
            }
            Node::EnumeratedList(children) => {
                self.render_block("ol", "rst-enumerated-list", children, level)
            }
            Node::ListItem(children) => self.render_block("li", "rst-list-item", children, level),
            Node::Line(children) => self.render_block("div", "rst-line", children, level),
            Node::LineBlock(children) => {
                self.render_block("div", "rst-line-block", children, level)
            }
            Node::LiteralBlock(children) => {
                self.render_block("pre", "rst-literal-block", children, level)
            }
            Node::BlockQuote(children) => {
                self.render_block("blockquote", "rst-block-quote", children, level)
            }
            Node::Text(value) => self.render_leaf("span", "rst-text", value),
            Node::InterpretedText { role, children } => {
                let class = match role {
                    Some(role) => format!("rst-interpreted_text rst-role-{}", role),
                    None => "rst-interpreted_text".to_string(),
                };
                self.render_inline("span", &class, children, level)
            }
            Node::Emphasis(children) => self.render_inline("em", "rst-emphasis", children, level),
            Node::Strong(children) => {
                self.render_inline("strong", "rst-strong", children, level)
            }
            Node::Literal(children) => self.render_inline("tt", "rst-literal", children, level),
            // No dedicated markup yet for these two; both use the fallback.
            Node::DefinitionList(children) => {
                self.render_unknown("definition_list", Some(children), "", level)
            }
            Node::Transition => self.render_unknown("transition", None, "", level),
            Node::Unknown { kind, content } => match content {
                Content::Children(children) => {
                    self.render_unknown(kind, Some(children), "", level)
                }
                Content::Value(value) => self.render_unknown(kind, None, value, level),
            },
        }
    }

    /// Render an element that owns its own lines.
    ///
    /// Children are rendered one level deeper and concatenated as-is.
    pub fn render_block(&self, tag: &str, class: &str, children: &[Node], level: usize) -> String {
        let indent = self.indent(level);
        let inner: String = children
            .iter()
            .map(|child| self.render_node(child, level + 1))
            .collect();
        format!("{indent}<{tag} class=\"{class}\">\n{inner}\n{indent}</{tag}>\n")
    }

    /// Render an element embedded in text flow.
    ///
    /// No indentation or line breaks are added, whatever the level.
    pub fn render_inline(
        &self,
        tag: &str,
        class: &str,
        children: &[Node],
        level: usize,
    ) -> String {
        let inner: String = children
            .iter()
            .map(|child| self.render_node(child, level + 1))
            .collect();
        format!("<{tag} class=\"{class}\">{inner}</{tag}>")
    }

    /// Render a text-bearing leaf, dropping at most one trailing newline.
    pub fn render_leaf(&self, tag: &str, class: &str, value: &str) -> String {
        let value = value.strip_suffix('\n').unwrap_or(value);
        format!("<{tag} class=\"{class}\">{value}</{tag}>")
    }

    fn render_section(&self, depth: u32, title: &[Node], children: &[Node], level: usize) -> String {
        let indent = self.indent(level);
        let title = self.render_block(
            &format!("h{}", depth),
            &format!("rst-title-{}", depth),
            title,
            level + 1,
        );
        let body = children
            .iter()
            .map(|child| self.render_node(child, level + 1))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{indent}<div class=\"rst-section\">\n{title}{body}{indent}</div>\n")
    }

    fn render_unknown(
        &self,
        kind: &str,
        children: Option<&[Node]>,
        value: &str,
        level: usize,
    ) -> String {
        log::debug!("Rendering `{}` node through fallback", kind);
        let class = format!("rst-unknown rst-{}", kind);
        match children {
            Some(children) => self.render_block("div", &class, children, level),
            None => self.render_leaf("div", &class, value),
        }
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::default()
    }

    #[test]
    fn test_leaf_strips_one_newline() {
        let r = renderer();
        assert_eq!(
            r.render_leaf("span", "rst-text", "hi\n\n"),
            "<span class=\"rst-text\">hi\n</span>"
        );
        assert_eq!(
            r.render_leaf("span", "rst-text", "hi"),
            "<span class=\"rst-text\">hi</span>"
        );
        assert_eq!(
            r.render_leaf("span", "rst-text", ""),
            "<span class=\"rst-text\"></span>"
        );
    }

    #[test]
    fn test_text_is_not_escaped() {
        let html = renderer().render(&Node::text("<b>&</b>"));
        assert_eq!(html, "<span class=\"rst-text\"><b>&</b></span>");
    }

    #[test]
    fn test_block_indentation_scales() {
        let r = renderer();
        let html = r.render_block("p", "rst-paragraph", &[], 3);
        assert_eq!(html, "      <p class=\"rst-paragraph\">\n\n      </p>\n");

        let wide = HtmlRenderer::new(&RenderOptions::default().with_indent(4));
        let html = wide.render_block("p", "rst-paragraph", &[], 1);
        assert!(html.starts_with("    <p"));
    }

    #[test]
    fn test_inline_ignores_level() {
        let r = renderer();
        let children = [Node::text("x")];
        let shallow = r.render_inline("em", "rst-emphasis", &children, 0);
        let deep = r.render_inline("em", "rst-emphasis", &children, 7);
        assert_eq!(shallow, deep);
        assert_eq!(shallow, "<em class=\"rst-emphasis\"><span class=\"rst-text\">x</span></em>");
    }

    #[test]
    fn test_inline_tags() {
        let r = renderer();
        let strong = Node::Strong(vec![Node::text("s")]);
        let literal = Node::Literal(vec![Node::text("l")]);
        assert_eq!(
            r.render(&strong),
            "<strong class=\"rst-strong\"><span class=\"rst-text\">s</span></strong>"
        );
        assert_eq!(
            r.render(&literal),
            "<tt class=\"rst-literal\"><span class=\"rst-text\">l</span></tt>"
        );
    }

    #[test]
    fn test_interpreted_text_role_class() {
        let r = renderer();
        let with_role = Node::interpreted(Some("math"), vec![Node::text("x")]);
        assert_eq!(
            r.render(&with_role),
            "<span class=\"rst-interpreted_text rst-role-math\"><span class=\"rst-text\">x</span></span>"
        );

        let plain = Node::interpreted(None, vec![]);
        assert_eq!(
            r.render(&plain),
            "<span class=\"rst-interpreted_text\"></span>"
        );
    }

    #[test]
    fn test_section_composition() {
        let section = Node::section(
            2,
            vec![Node::text("T")],
            vec![Node::paragraph_text("a\n"), Node::paragraph_text("b\n")],
        );
        let expected = concat!(
            "<div class=\"rst-section\">\n",
            "  <h2 class=\"rst-title-2\">\n",
            "<span class=\"rst-text\">T</span>\n",
            "  </h2>\n",
            "  <p class=\"rst-paragraph\">\n",
            "<span class=\"rst-text\">a</span>\n",
            "  </p>\n",
            "\n",
            "  <p class=\"rst-paragraph\">\n",
            "<span class=\"rst-text\">b</span>\n",
            "  </p>\n",
            "</div>\n",
        );
        assert_eq!(renderer().render(&section), expected);
    }

    #[test]
    fn test_section_without_body() {
        let section = Node::section(1, vec![], vec![]);
        assert_eq!(
            renderer().render(&section),
            "<div class=\"rst-section\">\n  <h1 class=\"rst-title-1\">\n\n  </h1>\n</div>\n"
        );
    }

    #[test]
    fn test_unknown_fallbacks() {
        let r = renderer();
        assert_eq!(
            r.render(&Node::unknown_leaf("comment", "note\n").unwrap()),
            "<div class=\"rst-unknown rst-comment\">note</div>"
        );
        assert_eq!(
            r.render(&Node::unknown("footnote", vec![]).unwrap()),
            "<div class=\"rst-unknown rst-footnote\">\n\n</div>\n"
        );
        assert_eq!(
            r.render(&Node::Transition),
            "<div class=\"rst-unknown rst-transition\"></div>"
        );
    }

    #[test]
    fn test_definition_list_is_not_dl() {
        let list = Node::DefinitionList(vec![]);
        let html = renderer().render(&list);
        assert_eq!(html, "<div class=\"rst-unknown rst-definition_list\">\n\n</div>\n");
        assert!(!html.contains("<dl"));
    }

    #[test]
    fn test_block_tags() {
        let r = renderer();
        let cases = [
            (Node::BulletList(vec![]), "ul", "rst-bullet-list"),
            (Node::EnumeratedList(vec![]), "ol", "rst-enumerated-list"),
            (Node::ListItem(vec![]), "li", "rst-list-item"),
            (Node::Line(vec![]), "div", "rst-line"),
            (Node::LineBlock(vec![]), "div", "rst-line-block"),
            (Node::LiteralBlock(vec![]), "pre", "rst-literal-block"),
            (Node::BlockQuote(vec![]), "blockquote", "rst-block-quote"),
            (Node::Document(vec![]), "div", "rst-document"),
        ];
        for (node, tag, class) in cases {
            assert_eq!(
                r.render(&node),
                format!("<{tag} class=\"{class}\">\n\n</{tag}>\n")
            );
        }
    }
}
