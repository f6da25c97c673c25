//! # Wiki Format
//!
//! The three transforms between wikitext and the other representations:
//!
//! | Direction | Module | Entry points |
//! |-----------|--------|--------------|
//! | text → triples | `extract` | `wikitext_to_triples` |
//! | triples → text | `generate` | `append_triples`, `ban_triples` |
//! | text → HTML | `render` | `wikitext_to_html` |
//!
//! All three are pure and share the term resolution below.

pub mod extract;
pub mod generate;
pub mod render;

pub use extract::wikitext_to_triples;
pub use generate::{append_triples, ban_triples, to_markup};
pub use render::wikitext_to_html;

use crate::markup::ast::{Link, Statement, Value};
use crate::model::{Iri, Literal, Term, TopicScope, Triple};
use crate::Result;

/// The IRI a link denotes: `:name` is taken relative to the wiki root.
pub fn resolve_link(link: &Link, root: &Iri) -> Result<Iri> {
    match link {
        Link::Internal(name) => root.join(name),
        Link::External(uri) => Iri::new(uri.as_str()),
    }
}

/// The term a statement value denotes.
pub fn resolve_value(value: &Value, root: &Iri) -> Result<Term> {
    Ok(match value {
        Value::Link(link) => Term::Iri(resolve_link(link, root)?),
        Value::Quoted(text) => Term::Literal(Literal::string(text.as_str())),
        Value::Bare(token) => Term::Literal(Literal::from_bare_token(token)),
    })
}

/// The triple a statement asserts about the scope's topic.
pub fn statement_triple(scope: &TopicScope, statement: &Statement) -> Result<Triple> {
    Ok(Triple::new(
        scope.subject(),
        resolve_link(&statement.predicate, scope.root())?,
        resolve_value(&statement.value, scope.root())?,
    ))
}
