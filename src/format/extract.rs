//! Text → graph: the triples a wikitext asserts.

use crate::markup;
use crate::model::{TopicScope, TripleSet};

use super::statement_triple;

/// Return the triples asserted by the statements of `wikitext`.
///
/// Lenient: prose, malformed markup, and commented-out statements contribute
/// nothing. A statement whose link cannot be made absolute (`<relative>`)
/// is skipped rather than failing the whole body.
pub fn wikitext_to_triples(scope: &TopicScope, wikitext: &str) -> TripleSet {
    let mut into = TripleSet::new();
    extract_into(scope, wikitext, &mut into);
    into
}

/// Like [`wikitext_to_triples`], adding to an existing set.
pub fn extract_into(scope: &TopicScope, wikitext: &str, into: &mut TripleSet) {
    for line in markup::parse(wikitext) {
        let mut found = 0usize;
        for statement in line.statements() {
            match statement_triple(scope, statement) {
                Ok(triple) => {
                    into.insert(triple);
                    found += 1;
                }
                Err(e) => tracing::trace!(line = line.number, error = %e, "statement skipped"),
            }
        }
        if found > 0 {
            tracing::trace!(line = line.number, found, "statements extracted");
        }
    }
}
