//! RDF terms: IRIs, blank nodes, and the `Term` sum type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Literal;
use crate::{Error, Result};

/// An absolute IRI.
///
/// Validated on construction: non-empty, starts with a URI scheme, and holds
/// none of the characters N-Triples forbids inside `<...>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Result<Self> {
        let iri = iri.into();
        if !has_scheme(&iri) {
            return Err(Error::InvalidIri(format!("'{iri}' is not absolute")));
        }
        if let Some(bad) = iri.chars().find(|c| is_forbidden(*c)) {
            return Err(Error::InvalidIri(format!("'{iri}' contains {bad:?}")));
        }
        Ok(Self(iri))
    }

    /// Build an IRI from a string known to be valid (vocabulary constants).
    pub(crate) fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part of this IRI following `base`, if `base` is a strict prefix.
    pub fn local_part<'a>(&'a self, base: &Iri) -> Option<&'a str> {
        self.0.strip_prefix(base.as_str()).filter(|rest| !rest.is_empty())
    }

    /// Append `local` to this IRI.
    pub fn join(&self, local: &str) -> Result<Iri> {
        Iri::new(format!("{}{}", self.0, local))
    }
}

fn has_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_forbidden(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

impl TryFrom<String> for Iri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Iri::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// An anonymous node. Representable, but refused everywhere a topic's
/// triples are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlankNode(pub String);

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Subject or object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
    BlankNode(BlankNode),
}

impl Term {
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::Literal(lit) => write!(f, "{lit}"),
            Term::BlankNode(node) => write!(f, "{node}"),
        }
    }
}
