//! Wikitext lexer: splits a body into classified lines.
//!
//! Everything here is line-local: comments end at the line break, a rule
//! occupies its whole line, and the auto-section marker is a line of its own.

/// Line that opens the machine-managed trailer.
pub const AUTO_MARKER: &str = "----# auto";

/// Suffix tagging a machine-generated statement line.
pub const AUTO_TAG: &str = "(auto)";

/// Prefix of the comment recording a retracted statement.
pub const BANNED_PREFIX: &str = "# banned: ";

/// Source span, in bytes, within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// How a line takes part in rendering and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Only whitespace before a comment: the line is dropped when rendered.
    Comment,
    /// Four or more dashes and nothing else, once the comment is stripped.
    Rule,
    /// Anything else, including blank lines.
    Text,
}

/// One line of wikitext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-based line index.
    pub number: usize,
    /// The line as written, without its line break.
    pub raw: &'a str,
    /// `raw` with any trailing comment removed. Always a prefix of `raw`.
    pub content: &'a str,
    pub kind: LineKind,
}

/// Split `wikitext` into lines on `\n`, classifying each.
pub fn lines(wikitext: &str) -> impl Iterator<Item = Line<'_>> {
    wikitext.split('\n').enumerate().map(|(number, raw)| classify(number, raw))
}

fn classify(number: usize, raw: &str) -> Line<'_> {
    let content = strip_comment(raw);
    let kind = if content.len() < raw.len() && content.trim().is_empty() {
        LineKind::Comment
    } else if is_rule(content) {
        LineKind::Rule
    } else {
        LineKind::Text
    };
    Line { number, raw, content, kind }
}

/// Byte offset of the first comment opener: `#` followed by whitespace.
pub fn comment_start(line: &str) -> Option<usize> {
    let mut chars = line.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        if ch == '#' && chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            return Some(pos);
        }
    }
    None
}

/// `line` up to its comment opener, if it has one.
pub fn strip_comment(line: &str) -> &str {
    match comment_start(line) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Whether `content` is a horizontal rule.
pub fn is_rule(content: &str) -> bool {
    content.len() >= 4 && content.bytes().all(|b| b == b'-')
}

/// Whether `line` is the auto-section marker.
pub fn is_auto_marker(line: &str) -> bool {
    line.trim() == AUTO_MARKER
}

/// Whether `wikitext` already holds an auto-section marker line.
pub fn has_auto_section(wikitext: &str) -> bool {
    wikitext.split('\n').any(is_auto_marker)
}
