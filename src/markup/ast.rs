//! Markup AST
//!
//! These types represent parsed wikitext. They are pure data: nothing here
//! resolves links against a wiki root or renders anything.

pub use super::lexer::{LineKind, Span};

/// A reference: `:name` inside the wiki, `<uri>` outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Internal(String),
    External(String),
}

/// Right-hand side of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An unquoted token that is itself a whole link.
    Link(Link),
    /// Any other unquoted token, kept verbatim.
    Bare(String),
    /// Contents of a double-quoted string, quotes removed.
    Quoted(String),
}

/// Semantic statement: `link->value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub predicate: Link,
    pub value: Value,
    /// The whole statement within its line.
    pub span: Span,
    /// The value as written (quotes included) within its line.
    pub value_span: Span,
}

/// A piece of a line's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Link(Link),
    Statement(Statement),
    /// `*text*`
    Emphasis(String),
}

/// A line with its inline structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub number: usize,
    pub raw: &'a str,
    pub content: &'a str,
    pub kind: LineKind,
    /// Empty for comment and rule lines.
    pub inlines: Vec<Inline>,
}

impl ParsedLine<'_> {
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Statement(s) => Some(s),
            _ => None,
        })
    }
}
