//! Inline markup parser.
//!
//! Recursive descent over the characters of one line's content:
//!
//! ```text
//! statement := link "->" value
//! link      := ":" ALPHA (ALNUM | "_" | "/")*  |  "<" uri ">"
//! value     := '"' [^"]+ '"'  |  [^"\s] \S*
//! emphasis  := "*" [^*<]+ "*"
//! ```
//!
//! Statements are found first, then links in the text between them, then
//! emphasis in what is left. Nothing fails: input that matches no rule is
//! returned as text.

use super::ast::*;

/// Cursor over a line, always on a char boundary.
struct Cursor<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn at(src: &'s str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.src[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// Advance while `pred` holds, returning the consumed slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.src[start..self.pos]
    }
}

// ============================================================================
// Grammar rules
// ============================================================================

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '/'
}

/// Whether `name` can be written as the internal link `:name`.
pub fn is_internal_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic()) && name.chars().all(is_name_char)
}

/// `link` starting at the cursor. Leaves the cursor after it on success.
fn parse_link(cur: &mut Cursor<'_>) -> Option<Link> {
    let start = cur.pos;
    let link = match cur.advance()? {
        ':' => {
            if !cur.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                None
            } else {
                Some(Link::Internal(cur.take_while(is_name_char).to_string()))
            }
        }
        '<' => {
            let first_ok = cur
                .peek()
                .is_some_and(|c| c != '/' && c != '>' && !c.is_whitespace());
            if !first_ok {
                None
            } else {
                let uri = cur.take_while(|c| c != '>' && !c.is_whitespace());
                cur.eat('>').then(|| Link::External(uri.to_string()))
            }
        }
        _ => None,
    };
    if link.is_none() {
        cur.pos = start;
    }
    link
}

/// `value` starting at the cursor.
fn parse_value(cur: &mut Cursor<'_>) -> Option<Value> {
    let start = cur.pos;
    match cur.peek()? {
        '"' => {
            cur.advance();
            let text = cur.take_while(|c| c != '"');
            if !text.is_empty() && cur.eat('"') {
                Some(Value::Quoted(text.to_string()))
            } else {
                cur.pos = start;
                None
            }
        }
        c if c.is_whitespace() => None,
        _ => {
            let token = cur.take_while(|c| !c.is_whitespace());
            Some(match whole_link(token) {
                Some(link) => Value::Link(link),
                None => Value::Bare(token.to_string()),
            })
        }
    }
}

/// `token` read as a single link, if it is exactly one.
pub fn whole_link(token: &str) -> Option<Link> {
    let mut cur = Cursor::at(token, 0);
    let link = parse_link(&mut cur)?;
    (cur.pos == token.len()).then_some(link)
}

/// `statement` starting at the cursor.
fn parse_statement(cur: &mut Cursor<'_>) -> Option<Statement> {
    let start = cur.pos;
    let parsed = parse_link(cur).and_then(|predicate| {
        if !cur.eat_str("->") {
            return None;
        }
        let value_start = cur.pos;
        let value = parse_value(cur)?;
        Some(Statement {
            predicate,
            value,
            span: Span { start, end: cur.pos },
            value_span: Span { start: value_start, end: cur.pos },
        })
    });
    if parsed.is_none() {
        cur.pos = start;
    }
    parsed
}

/// `emphasis` starting at the cursor, returning its inner text.
fn parse_emphasis<'s>(cur: &mut Cursor<'s>) -> Option<&'s str> {
    let start = cur.pos;
    if cur.eat('*') {
        let text = cur.take_while(|c| c != '*' && c != '<');
        if !text.is_empty() && cur.eat('*') {
            return Some(text);
        }
    }
    cur.pos = start;
    None
}

// ============================================================================
// Scanning passes
// ============================================================================

/// Leftmost, non-overlapping matches of `rule` in `src[range]`, interleaved
/// with the unmatched text between them.
fn scan<'s, T>(
    src: &'s str,
    start: usize,
    end: usize,
    mut rule: impl FnMut(&mut Cursor<'s>) -> Option<T>,
) -> Vec<Result<T, Span>> {
    let mut out = Vec::new();
    let mut cur = Cursor::at(&src[..end], start);
    let mut text_start = start;
    while cur.pos < end {
        let here = cur.pos;
        match rule(&mut cur) {
            Some(found) => {
                if text_start < here {
                    out.push(Err(Span { start: text_start, end: here }));
                }
                out.push(Ok(found));
                text_start = cur.pos;
            }
            None => {
                cur.advance();
            }
        }
    }
    if text_start < end {
        out.push(Err(Span { start: text_start, end }));
    }
    out
}

/// All statements of a line's content.
pub fn parse_statements(content: &str) -> Vec<Statement> {
    scan(content, 0, content.len(), parse_statement)
        .into_iter()
        .filter_map(|piece| piece.ok())
        .collect()
}

/// Full inline structure of a line's content.
pub fn parse_inlines(content: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for piece in scan(content, 0, content.len(), parse_statement) {
        let gap = match piece {
            Ok(statement) => {
                inlines.push(Inline::Statement(statement));
                continue;
            }
            Err(gap) => gap,
        };
        for piece in scan(content, gap.start, gap.end, parse_link) {
            let text = match piece {
                Ok(link) => {
                    inlines.push(Inline::Link(link));
                    continue;
                }
                Err(text) => text,
            };
            for piece in scan(content, text.start, text.end, parse_emphasis) {
                inlines.push(match piece {
                    Ok(emph) => Inline::Emphasis(emph.to_string()),
                    Err(plain) => Inline::Text(content[plain.start..plain.end].to_string()),
                });
            }
        }
    }
    inlines
}
