//! Block structure recognition.
//!
//! Works on line slices whose block-level elements start at column 0.
//! Nested bodies (list items, definitions, block quotes) are dedented and
//! parsed recursively. Section titles are only recognized at the top level;
//! the flat sequence of titles and body elements found there is folded
//! into nested sections by [`BlockParser::parse_document`].

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Node;

use super::inline::parse_inline;
use super::lines::{adornment_char, indented_block_end, min_indent, trim_trailing_blank, Line};
use super::ParseOptions;

/// Shortest underline accepted for a title longer than its underline.
const MIN_ADORNMENT: usize = 4;

/// Shortest line of punctuation read as a transition.
const MIN_TRANSITION: usize = 4;

fn enumerator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:\((?:[0-9]+|[A-Za-z]|[ivxlcdm]+|[IVXLCDM]+|#)\)|(?:[0-9]+|[A-Za-z]|[ivxlcdm]+|[IVXLCDM]+|#)[.)])(?: +|$)",
        )
        .expect("enumerator pattern is valid")
    })
}

/// Element found at the top level of a document.
enum Element {
    Body(Node),
    Title { depth: u32, title: Vec<Node> },
}

/// A recognized section title.
struct TitleMatch {
    text: String,
    style: (char, bool),
    line: usize,
    consumed: usize,
}

/// Section being assembled.
struct OpenSection {
    depth: u32,
    title: Vec<Node>,
    children: Vec<Node>,
}

/// Block parser holding the section styles seen so far.
pub(crate) struct BlockParser<'a> {
    options: &'a ParseOptions,
    styles: Vec<(char, bool)>,
}

impl<'a> BlockParser<'a> {
    /// Create a new block parser.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            styles: Vec::new(),
        }
    }

    /// Parse a whole document.
    pub fn parse_document(&mut self, lines: &[Line]) -> Result<Node> {
        let elements = self.parse_elements(lines, true)?;

        let mut root = Vec::new();
        let mut stack: Vec<OpenSection> = Vec::new();

        for element in elements {
            match element {
                Element::Body(node) => match stack.last_mut() {
                    Some(open) => open.children.push(node),
                    None => root.push(node),
                },
                Element::Title { depth, title } => {
                    while stack.last().is_some_and(|open| open.depth >= depth) {
                        close_section(&mut stack, &mut root);
                    }
                    stack.push(OpenSection {
                        depth,
                        title,
                        children: Vec::new(),
                    });
                }
            }
        }
        while !stack.is_empty() {
            close_section(&mut stack, &mut root);
        }

        Ok(Node::Document(root))
    }

    /// Parse a nested body, where titles are not allowed.
    fn parse_body(&mut self, lines: &[Line]) -> Result<Vec<Node>> {
        Ok(self
            .parse_elements(lines, false)?
            .into_iter()
            .filter_map(|element| match element {
                Element::Body(node) => Some(node),
                Element::Title { .. } => None,
            })
            .collect())
    }

    fn parse_elements(&mut self, lines: &[Line], top_level: bool) -> Result<Vec<Element>> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            if line.is_blank() {
                i += 1;
                continue;
            }

            if line.indent > 0 {
                let end = indented_block_end(lines, i, 1);
                let body = dedent_block(&lines[i..end]);
                log::trace!("line {}: block quote", line.number);
                out.push(Element::Body(Node::BlockQuote(self.parse_body(&body)?)));
                i = end;
                continue;
            }

            if let Some(found) = self.match_title(lines, i)? {
                if top_level {
                    let depth = self.section_depth(found.style, found.line, &out)?;
                    let title = parse_inline(&found.text, found.line, self.options)?;
                    out.push(Element::Title { depth, title });
                    i += found.consumed;
                    continue;
                }
                self.recoverable(found.line, "Unexpected section title")?;
            }

            if is_transition(lines, i) {
                out.push(Element::Body(Node::Transition));
                i += 1;
                continue;
            }

            if bullet_width(&line.text).is_some() {
                let (node, end) = self.parse_bullet_list(lines, i)?;
                out.push(Element::Body(node));
                i = end;
                continue;
            }

            if starts_enumerated_list(lines, i) {
                let (node, end) = self.parse_enumerated_list(lines, i)?;
                out.push(Element::Body(node));
                i = end;
                continue;
            }

            if line_block_content(&line.text).is_some() {
                let (node, end) = self.parse_line_block(lines, i)?;
                out.push(Element::Body(node));
                i = end;
                continue;
            }

            if starts_definition(lines, i) {
                let (node, end) = self.parse_definition_list(lines, i)?;
                out.push(Element::Body(node));
                i = end;
                continue;
            }

            let end = self.parse_paragraph(lines, i, &mut out)?;
            i = end;
        }

        Ok(out)
    }

    fn match_title(&self, lines: &[Line], i: usize) -> Result<Option<TitleMatch>> {
        let line = &lines[i];

        // Overline, title, underline.
        if let (Some(c), Some(text), Some(under)) = (
            adornment_char(&line.text),
            lines.get(i + 1),
            lines.get(i + 2),
        ) {
            if !text.is_blank()
                && under.indent == 0
                && adornment_char(&under.text) == Some(c)
                && adornment_char(&text.text) != Some(c)
            {
                let width = text.width();
                if line.width() < width || under.width() < width {
                    self.recoverable(text.number, "Title overline too short")?;
                }
                return Ok(Some(TitleMatch {
                    text: text.text.clone(),
                    style: (c, true),
                    line: text.number,
                    consumed: 3,
                }));
            }
        }

        // Title, underline.
        if let Some(under) = lines.get(i + 1) {
            if let Some(c) = adornment_char(&under.text) {
                if under.indent == 0 && adornment_char(&line.text).is_none() {
                    let width = line.width();
                    if under.width() < width {
                        if under.width() < MIN_ADORNMENT {
                            return Ok(None);
                        }
                        self.recoverable(line.number, "Title underline too short")?;
                    }
                    return Ok(Some(TitleMatch {
                        text: line.text.clone(),
                        style: (c, false),
                        line: line.number,
                        consumed: 2,
                    }));
                }
            }
        }

        Ok(None)
    }

    /// Depth of a title with the given adornment style.
    ///
    /// Styles get levels in order of first appearance.
    fn section_depth(&mut self, style: (char, bool), line: usize, seen: &[Element]) -> Result<u32> {
        let current = seen
            .iter()
            .rev()
            .find_map(|element| match element {
                Element::Title { depth, .. } => Some(*depth),
                Element::Body(_) => None,
            })
            .unwrap_or(0);

        let depth = match self.styles.iter().position(|s| *s == style) {
            Some(idx) => idx as u32 + 1,
            None => {
                self.styles.push(style);
                self.styles.len() as u32
            }
        };

        if depth > current + 1 {
            self.recoverable(line, "Title level inconsistent")?;
        }
        log::debug!(
            "line {}: section depth {} for `{}` adornment (overline: {})",
            line,
            depth,
            style.0,
            style.1
        );
        Ok(depth)
    }

    fn parse_paragraph(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> Result<usize> {
        let mut end = start + 1;
        while end < lines.len() && !lines[end].is_blank() && lines[end].indent == 0 {
            end += 1;
        }
        if end < lines.len() && !lines[end].is_blank() {
            self.recoverable(lines[end].number, "Unexpected indentation")?;
        }

        let mut texts: Vec<String> = lines[start..end].iter().map(|l| l.text.clone()).collect();
        let mut literal = false;

        if let Some(last) = texts.last_mut() {
            if last.ends_with("::") {
                literal = true;
                if *last == "::" {
                    texts.pop();
                } else if last.ends_with(" ::") {
                    let keep = last.len() - 3;
                    last.truncate(keep);
                    let trimmed = last.trim_end().len();
                    last.truncate(trimmed);
                } else {
                    last.pop();
                }
            }
        }

        if !texts.is_empty() {
            let mut source = texts.join("\n");
            source.push('\n');
            let inline = parse_inline(&source, lines[start].number, self.options)?;
            out.push(Element::Body(Node::Paragraph(split_text_lines(inline))));
        }

        if !literal {
            return Ok(end);
        }

        let mut next = end;
        while next < lines.len() && lines[next].is_blank() {
            next += 1;
        }
        if next < lines.len() && lines[next].indent > 0 {
            let block_end = indented_block_end(lines, next, 1);
            let block = dedent_block(&lines[next..block_end]);
            let mut text = block
                .iter()
                .map(Line::to_source)
                .collect::<Vec<_>>()
                .join("\n");
            text.push('\n');
            log::trace!("line {}: literal block", lines[next].number);
            out.push(Element::Body(Node::LiteralBlock(vec![Node::text(text)])));
            return Ok(block_end);
        }

        let line = lines.get(next).map_or(lines[end - 1].number, |l| l.number);
        self.recoverable(line, "Literal block expected; none found")?;
        Ok(end)
    }

    fn parse_bullet_list(&mut self, lines: &[Line], start: usize) -> Result<(Node, usize)> {
        let bullet = lines[start].text.chars().next();
        let mut items = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let line = &lines[i];
            if line.indent != 0 || line.text.chars().next() != bullet {
                break;
            }
            let Some(width) = bullet_width(&line.text) else {
                break;
            };
            let (item, end) = self.parse_list_item(lines, i, width)?;
            items.push(item);
            i = skip_blank(lines, end);
        }

        Ok((Node::BulletList(items), retreat_blank(lines, start, i)))
    }

    fn parse_enumerated_list(&mut self, lines: &[Line], start: usize) -> Result<(Node, usize)> {
        let mut items = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let line = &lines[i];
            if line.indent != 0 {
                break;
            }
            let Some(found) = enumerator_regex().find(&line.text) else {
                break;
            };
            let width = line.text[..found.end()].chars().count();
            let (item, end) = self.parse_list_item(lines, i, width)?;
            items.push(item);
            i = skip_blank(lines, end);
        }

        Ok((Node::EnumeratedList(items), retreat_blank(lines, start, i)))
    }

    /// Parse one list item whose text starts `width` columns into line `start`.
    fn parse_list_item(&mut self, lines: &[Line], start: usize, width: usize) -> Result<(Node, usize)> {
        let first = &lines[start];
        let end = indented_block_end(lines, start + 1, 1);

        let mut body = Vec::with_capacity(end - start);
        body.push(Line {
            indent: 0,
            text: first.text.chars().skip(width).collect::<String>().trim_start().to_string(),
            number: first.number,
        });
        body.extend(lines[start + 1..end].iter().map(|l| l.dedent(width.min(l.indent))));

        let children = if body[0].is_blank() {
            let rest = dedent_block(&body[1..]);
            self.parse_body(&rest)?
        } else {
            self.parse_body(&body)?
        };
        Ok((Node::ListItem(children), end))
    }

    fn parse_line_block(&mut self, lines: &[Line], start: usize) -> Result<(Node, usize)> {
        let mut entries: Vec<(usize, String, usize)> = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let line = &lines[i];
            if line.is_blank() {
                break;
            }
            if line.indent > 0 {
                // Continuation of the previous line.
                match entries.last_mut() {
                    Some((_, text, _)) => {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                        text.push_str(&line.text);
                        i += 1;
                        continue;
                    }
                    None => break,
                }
            }
            let Some(content) = line_block_content(&line.text) else {
                break;
            };
            let trimmed = content.trim_start_matches(' ');
            let indent = if trimmed.is_empty() {
                entries.last().map_or(0, |(indent, _, _)| *indent)
            } else {
                content.len() - trimmed.len()
            };
            entries.push((indent, trimmed.to_string(), line.number));
            i += 1;
        }

        let base = entries.iter().map(|(indent, _, _)| *indent).min().unwrap_or(0);
        let children = self.build_line_block(&entries, base)?;
        Ok((Node::LineBlock(children), i))
    }

    /// Build lines at `base` indentation; deeper runs become nested blocks.
    fn build_line_block(&self, entries: &[(usize, String, usize)], base: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < entries.len() {
            let (indent, text, number) = &entries[i];
            if *indent <= base {
                nodes.push(Node::Line(parse_inline(text, *number, self.options)?));
                i += 1;
                continue;
            }
            let run_end = entries[i..]
                .iter()
                .position(|(indent, _, _)| *indent <= base)
                .map_or(entries.len(), |pos| i + pos);
            let run = &entries[i..run_end];
            let nested_base = run.iter().map(|(indent, _, _)| *indent).min().unwrap_or(base + 1);
            nodes.push(Node::LineBlock(self.build_line_block(run, nested_base)?));
            i = run_end;
        }

        Ok(nodes)
    }

    fn parse_definition_list(&mut self, lines: &[Line], start: usize) -> Result<(Node, usize)> {
        let mut items = Vec::new();
        let mut i = start;

        while i < lines.len() && starts_definition(lines, i) {
            let term_line = &lines[i];
            let term = parse_inline(&term_line.text, term_line.number, self.options)?;
            let end = indented_block_end(lines, i + 1, 1);
            let body = dedent_block(&lines[i + 1..end]);
            let definition = self.parse_body(&body)?;

            items.push(Node::unknown(
                "definition_list_item",
                vec![
                    Node::unknown("term", term)?,
                    Node::unknown("definition", definition)?,
                ],
            )?);
            i = skip_blank(lines, end);
        }

        Ok((Node::DefinitionList(items), retreat_blank(lines, start, i)))
    }

    /// Report a recoverable markup problem.
    fn recoverable(&self, line: usize, message: &str) -> Result<()> {
        if self.options.is_strict() {
            return Err(Error::parse(line, message));
        }
        log::warn!("line {}: {}", line, message);
        Ok(())
    }
}

fn close_section(stack: &mut Vec<OpenSection>, root: &mut Vec<Node>) {
    if let Some(open) = stack.pop() {
        let node = Node::Section {
            depth: open.depth,
            title: open.title,
            children: open.children,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root.push(node),
        }
    }
}

/// Dedent a block by its smallest indentation and drop trailing blanks.
fn dedent_block(lines: &[Line]) -> Vec<Line> {
    let lines = trim_trailing_blank(lines);
    let amount = min_indent(lines);
    lines.iter().map(|line| line.dedent(amount)).collect()
}

/// Split top-level text nodes after each newline, one node per source line.
fn split_text_lines(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(value) if value.contains('\n') => {
                out.extend(
                    value
                        .split_inclusive('\n')
                        .map(|part| Node::text(part.to_string())),
                );
            }
            other => out.push(other),
        }
    }
    out
}

fn skip_blank(lines: &[Line], mut i: usize) -> usize {
    while i < lines.len() && lines[i].is_blank() {
        i += 1;
    }
    i
}

/// Step back over blank lines consumed past the end of a list.
fn retreat_blank(lines: &[Line], start: usize, mut i: usize) -> usize {
    while i > start + 1 && lines[i - 1].is_blank() {
        i -= 1;
    }
    i
}

/// Width of a bullet marker and the space after it.
fn bullet_width(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    let bullet = chars.next()?;
    if !matches!(bullet, '-' | '*' | '+') {
        return None;
    }
    match chars.next() {
        None => Some(1),
        Some(' ') => Some(2 + chars.take_while(|c| *c == ' ').count()),
        Some(_) => None,
    }
}

/// Content of a line block line, after the `|` marker.
fn line_block_content(text: &str) -> Option<&str> {
    if text == "|" {
        return Some("");
    }
    text.strip_prefix("| ")
}

fn is_transition(lines: &[Line], i: usize) -> bool {
    let line = &lines[i];
    adornment_char(&line.text).is_some()
        && line.width() >= MIN_TRANSITION
        && lines.get(i + 1).map_or(true, Line::is_blank)
}

/// An enumerator starts a list only when the next line is blank, indented
/// or another list item.
fn starts_enumerated_list(lines: &[Line], i: usize) -> bool {
    if !enumerator_regex().is_match(&lines[i].text) {
        return false;
    }
    match lines.get(i + 1) {
        None => true,
        Some(next) => {
            next.is_blank() || next.indent > 0 || enumerator_regex().is_match(&next.text)
        }
    }
}

/// A term is a single line immediately followed by an indented definition.
fn starts_definition(lines: &[Line], i: usize) -> bool {
    let line = &lines[i];
    !line.is_blank()
        && line.indent == 0
        && lines
            .get(i + 1)
            .is_some_and(|next| !next.is_blank() && next.indent > 0)
}
