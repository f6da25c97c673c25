//! # Wikitext Markup
//!
//! The shared grammar behind extraction, generation, and rendering:
//! comments, links, emphasis, horizontal rules, and `link->value`
//! statements. Pure functions without I/O or state.

pub mod ast;
pub mod lexer;
pub mod parser;

use ast::{LineKind, ParsedLine};

/// Parse a whole wikitext body into lines with their inline structure.
///
/// Never fails: anything the grammar does not recognise is kept as text.
pub fn parse(wikitext: &str) -> Vec<ParsedLine<'_>> {
    lexer::lines(wikitext)
        .map(|line| ParsedLine {
            number: line.number,
            raw: line.raw,
            content: line.content,
            kind: line.kind,
            inlines: match line.kind {
                LineKind::Text => parser::parse_inlines(line.content),
                LineKind::Comment | LineKind::Rule => Vec::new(),
            },
        })
        .collect()
}
