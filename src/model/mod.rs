//! # Triple Model
//!
//! Plain data shared by every layer: terms, literals, triples, triple sets,
//! and the closed SemWiki vocabulary.
//!
//! Design rule: no markup, no storage, no async here. Blank nodes exist as a
//! variant so they can be named and refused; nothing in the wiki produces them.

pub mod term;
pub mod literal;
pub mod triple;
pub mod triple_set;
pub mod scope;
pub mod vocab;

pub use term::{Iri, BlankNode, Term};
pub use literal::{Literal, LiteralKind};
pub use triple::Triple;
pub use triple_set::{TripleSet, TripleDiff};
pub use scope::TopicScope;
pub use vocab::{Vocab, SW_NS};
