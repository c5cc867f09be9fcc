//! Inline markup recognition.
//!
//! Handles ``literal``, **strong**, *emphasis*, `interpreted` text with an
//! optional role prefix or suffix, and `phrase`_ references. Start and end
//! strings follow the reStructuredText recognition rules: a start string
//! must not be followed by whitespace, an end string must not be preceded
//! by whitespace, and both must sit next to whitespace or punctuation.

use crate::error::{Error, Result};
use crate::model::Node;

use super::ParseOptions;

const START_PREFIX: &str = "'\"([{<-/:";
const END_SUFFIX: &str = "-.,:;!?\\/'\")]}>";

/// Inline markup parser for a single text block.
pub(crate) struct InlineParser<'a> {
    chars: Vec<char>,
    line: usize,
    options: &'a ParseOptions,
}

impl<'a> InlineParser<'a> {
    /// Create a parser for `text`, which starts at source line `line`.
    pub fn new(text: &str, line: usize, options: &'a ParseOptions) -> Self {
        Self {
            chars: text.chars().collect(),
            line,
            options,
        }
    }

    /// Parse the text into inline nodes.
    pub fn parse(&self) -> Result<Vec<Node>> {
        let chars = &self.chars;
        let mut nodes = Vec::new();
        let mut buf = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\\' {
                match chars.get(i + 1) {
                    Some(' ') => {}
                    // Nothing follows but the line end: keep the backslash.
                    Some('\n') if i + 2 == chars.len() => {
                        buf.push(c);
                        buf.push('\n');
                    }
                    Some(&next) => buf.push(next),
                    None => buf.push(c),
                }
                i += 2;
                continue;
            }

            if let Some((node, next)) = self.markup_at(i)? {
                flush(&mut buf, &mut nodes);
                nodes.push(node);
                i = next;
                continue;
            }

            buf.push(c);
            i += 1;
        }

        flush(&mut buf, &mut nodes);
        Ok(nodes)
    }

    /// Try to recognize markup starting at `i`.
    ///
    /// Returns the node and the index just past it. Unterminated start
    /// strings are reported and yield `None`, leaving them as text.
    fn markup_at(&self, i: usize) -> Result<Option<(Node, usize)>> {
        let chars = &self.chars;
        if !self.start_allowed(i) {
            return Ok(None);
        }

        if chars[i] == ':' {
            return Ok(self.role_prefix_at(i));
        }

        let (start, kind) = if self.starts_with(i, "``") {
            ("``", Markup::Literal)
        } else if self.starts_with(i, "**") {
            ("**", Markup::Strong)
        } else if chars[i] == '*' {
            ("*", Markup::Emphasis)
        } else if chars[i] == '`' {
            ("`", Markup::Interpreted)
        } else {
            return Ok(None);
        };

        let content_start = i + start.chars().count();
        if !self.content_can_start(i, content_start) {
            return Ok(None);
        }

        let Some(end) = self.find_end(content_start, start, kind) else {
            self.unterminated(start)?;
            return Ok(None);
        };

        let content: String = chars[content_start..end].iter().collect();
        let mut next = end + start.chars().count();

        let node = match kind {
            Markup::Literal => Node::Literal(vec![Node::text(content)]),
            Markup::Strong => Node::Strong(vec![Node::text(unescape(&content))]),
            Markup::Emphasis => Node::Emphasis(vec![Node::text(unescape(&content))]),
            Markup::Interpreted => {
                let text = vec![Node::text(unescape(&content))];
                if chars.get(next) == Some(&'_') {
                    next += 1;
                    if chars.get(next) == Some(&'_') {
                        next += 1;
                    }
                    Node::unknown("reference", text)?
                } else if let Some((role, after)) = self.role_at(next) {
                    next = after;
                    Node::interpreted(Some(&role), text)
                } else {
                    Node::interpreted(None, text)
                }
            }
        };

        Ok(Some((node, next)))
    }

    /// Recognize `:role:`text`` starting at `i`.
    fn role_prefix_at(&self, i: usize) -> Option<(Node, usize)> {
        let (role, after) = self.role_at(i)?;
        if self.chars.get(after) != Some(&'`') || !self.content_can_start(after, after + 1) {
            return None;
        }
        let end = self.find_end(after + 1, "`", Markup::Interpreted)?;
        let content: String = self.chars[after + 1..end].iter().collect();
        Some((
            Node::interpreted(Some(&role), vec![Node::text(unescape(&content))]),
            end + 1,
        ))
    }

    /// Match a `:name:` role marker at `i`.
    fn role_at(&self, i: usize) -> Option<(String, usize)> {
        let chars = &self.chars;
        if chars.get(i) != Some(&':') {
            return None;
        }
        let name_len = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
            .count();
        let close = i + 1 + name_len;
        if name_len == 0 || chars.get(close) != Some(&':') {
            return None;
        }
        Some((chars[i + 1..close].iter().collect(), close + 1))
    }

    fn find_end(&self, from: usize, end: &str, kind: Markup) -> Option<usize> {
        let chars = &self.chars;
        let len = end.chars().count();
        let mut j = from;
        while j + len <= chars.len() {
            if kind != Markup::Literal && chars[j] == '\\' {
                j += 2;
                continue;
            }
            if self.starts_with(j, end) && j > from && self.end_allowed(j, len, kind) {
                return Some(j);
            }
            j += 1;
        }
        None
    }

    fn start_allowed(&self, i: usize) -> bool {
        let Some(prev) = i.checked_sub(1).map(|p| self.chars[p]) else {
            return true;
        };
        prev.is_whitespace() || START_PREFIX.contains(prev)
    }

    /// A start string needs content, and must not be wrapped in a matching
    /// pair of quotes or brackets like `(*)`.
    fn content_can_start(&self, i: usize, content_start: usize) -> bool {
        let Some(&next) = self.chars.get(content_start) else {
            return false;
        };
        if next.is_whitespace() {
            return false;
        }
        if let Some(prev) = i.checked_sub(1).map(|p| self.chars[p]) {
            let closer = match prev {
                '\'' => '\'',
                '"' => '"',
                '(' => ')',
                '[' => ']',
                '{' => '}',
                '<' => '>',
                _ => return true,
            };
            return next != closer;
        }
        true
    }

    fn end_allowed(&self, j: usize, len: usize, kind: Markup) -> bool {
        let chars = &self.chars;
        if chars[j - 1].is_whitespace() {
            return false;
        }
        let mut after = j + len;
        if kind == Markup::Interpreted {
            if chars.get(after) == Some(&'_') {
                after += 1;
                if chars.get(after) == Some(&'_') {
                    after += 1;
                }
            } else if let Some((_, role_end)) = self.role_at(after) {
                after = role_end;
            }
        }
        match chars.get(after) {
            None => true,
            Some(c) => c.is_whitespace() || END_SUFFIX.contains(*c),
        }
    }

    fn starts_with(&self, i: usize, pattern: &str) -> bool {
        let mut idx = i;
        for p in pattern.chars() {
            if self.chars.get(idx) != Some(&p) {
                return false;
            }
            idx += 1;
        }
        true
    }

    fn unterminated(&self, start: &str) -> Result<()> {
        let message = format!("Inline markup start-string `{}` without end-string", start);
        if self.options.is_strict() {
            return Err(Error::parse(self.line, message));
        }
        log::warn!("line {}: {}", self.line, message);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Literal,
    Strong,
    Emphasis,
    Interpreted,
}

fn flush(buf: &mut String, nodes: &mut Vec<Node>) {
    if !buf.is_empty() {
        nodes.push(Node::text(std::mem::take(buf)));
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(' ') | None => {}
                Some(next) => out.push(next),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse inline markup in `text`.
pub(crate) fn parse_inline(text: &str, line: usize, options: &ParseOptions) -> Result<Vec<Node>> {
    InlineParser::new(text, line, options).parse()
}
