//! The SemWiki vocabulary, declared statically.
//!
//! The namespace is closed: any IRI inside it that is not one of the
//! [`Vocab`] terms is refused when a reference is built from it.

use super::Iri;
use crate::{Error, Result};

/// Namespace of the SemWiki vocabulary.
pub const SW_NS: &str = "http://liris.cnrs.fr/silex/2012/semwiki#";

/// `rdf:` terms used by the wiki.
pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// XML Schema datatypes for literals.
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// A term of the SemWiki vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocab {
    /// Root of a wiki → its home topic.
    Home,
    /// Topic → its wikitext literal.
    Wikitext,
    SemWiki,
    Topic,
}

impl Vocab {
    pub const ALL: [Vocab; 4] = [Vocab::Home, Vocab::Wikitext, Vocab::SemWiki, Vocab::Topic];

    pub fn local_name(&self) -> &'static str {
        match self {
            Vocab::Home => "home",
            Vocab::Wikitext => "wikitext",
            Vocab::SemWiki => "SemWiki",
            Vocab::Topic => "Topic",
        }
    }

    pub fn iri(&self) -> Iri {
        Iri::new_unchecked(format!("{SW_NS}{}", self.local_name()))
    }

    pub fn from_local(name: &str) -> Option<Vocab> {
        Vocab::ALL.into_iter().find(|v| v.local_name() == name)
    }

    /// Resolve `iri` against the vocabulary.
    ///
    /// `Ok(None)` for IRIs outside the namespace; an error for unknown names
    /// inside it.
    pub fn from_iri(iri: &Iri) -> Result<Option<Vocab>> {
        match iri.as_str().strip_prefix(SW_NS) {
            None => Ok(None),
            Some(name) => Vocab::from_local(name).map(Some).ok_or_else(|| {
                Error::InvalidDataError(format!("{iri} is not in the SemWiki vocabulary"))
            }),
        }
    }

    /// Whether `iri` lies inside the vocabulary namespace.
    pub fn is_reserved(iri: &Iri) -> bool {
        iri.as_str().starts_with(SW_NS)
    }
}

/// `sw:wikitext`, the one property every topic carries exactly once.
pub fn wikitext() -> Iri {
    Vocab::Wikitext.iri()
}

pub fn rdf_type() -> Iri {
    Iri::new_unchecked(rdf::TYPE)
}
