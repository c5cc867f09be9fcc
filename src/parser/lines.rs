//! Source line preparation.

/// A source line with its indentation split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    /// Leading spaces after tab expansion
    pub indent: usize,
    /// Line content without indentation or trailing whitespace
    pub text: String,
    /// 1-indexed line number in the source
    pub number: usize,
}

impl Line {
    /// Check if the line has no content.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters in the content.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// Copy of this line with `amount` columns of indentation removed.
    pub fn dedent(&self, amount: usize) -> Line {
        Line {
            indent: self.indent.saturating_sub(amount),
            text: self.text.clone(),
            number: self.number,
        }
    }

    /// The line with its remaining indentation restored as spaces.
    pub fn to_source(&self) -> String {
        format!("{}{}", " ".repeat(self.indent), self.text)
    }
}

/// Split a source into lines, expanding tabs and trimming trailing whitespace.
pub(crate) fn split_lines(source: &str, tab_width: usize) -> Vec<Line> {
    let tab_width = tab_width.max(1);
    source
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let expanded = expand_tabs(raw.trim_end_matches('\r'), tab_width);
            let trimmed = expanded.trim_end();
            let content = trimmed.trim_start_matches(' ');
            let indent = trimmed.len() - content.len();
            Line {
                indent: if content.is_empty() { 0 } else { indent },
                text: content.to_string(),
                number: idx + 1,
            }
        })
        .collect()
}

fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + tab_width);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = tab_width - column % tab_width;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Get the adornment character of a line made of one repeated punctuation mark.
pub(crate) fn adornment_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !first.is_ascii_punctuation() {
        return None;
    }
    chars.all(|c| c == first).then_some(first)
}

/// Smallest indentation among the non-blank lines.
pub(crate) fn min_indent(lines: &[Line]) -> usize {
    lines
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| line.indent)
        .min()
        .unwrap_or(0)
}

/// Drop blank lines at the end of a block.
pub(crate) fn trim_trailing_blank(lines: &[Line]) -> &[Line] {
    let end = lines
        .iter()
        .rposition(|line| !line.is_blank())
        .map_or(0, |pos| pos + 1);
    &lines[..end]
}

/// End of the indented block starting at `start`.
///
/// The block runs until the first non-blank line indented less than
/// `min_indent`; trailing blank lines are not part of it.
pub(crate) fn indented_block_end(lines: &[Line], start: usize, min_indent: usize) -> usize {
    let mut end = start;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        if line.is_blank() {
            continue;
        }
        if line.indent < min_indent {
            break;
        }
        end = idx + 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let lines = split_lines("Title\r\n  body  \n\n\tcode", 4);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "Title");
        assert_eq!(lines[1].indent, 2);
        assert_eq!(lines[1].text, "body");
        assert!(lines[2].is_blank());
        assert_eq!(lines[3].indent, 4);
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_expand_tabs_to_stops() {
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("\t\tx", 2), "    x");
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let lines = split_lines("   \t ", 8);
        assert!(lines[0].is_blank());
        assert_eq!(lines[0].indent, 0);
    }

    #[test]
    fn test_adornment_char() {
        assert_eq!(adornment_char("====="), Some('='));
        assert_eq!(adornment_char("~"), Some('~'));
        assert_eq!(adornment_char("=-="), None);
        assert_eq!(adornment_char("aaaa"), None);
        assert_eq!(adornment_char(""), None);
    }

    #[test]
    fn test_indented_block_end() {
        let lines = split_lines("  a\n\n  b\n\nc", 8);
        assert_eq!(indented_block_end(&lines, 0, 1), 3);
        assert_eq!(trim_trailing_blank(&lines[..4]).len(), 3);
        assert_eq!(min_indent(&lines[..3]), 2);
    }

    #[test]
    fn test_dedent_and_source() {
        let line = Line {
            indent: 6,
            text: "x = 1".to_string(),
            number: 3,
        };
        assert_eq!(line.dedent(2).to_source(), "    x = 1");
        assert_eq!(line.dedent(10).indent, 0);
    }
}
