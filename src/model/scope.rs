//! TopicScope: a topic's identity relative to the wiki it lives in.

use super::vocab;
use super::{Iri, Literal, Term, Triple, TripleSet};
use crate::{Error, Result};

/// The wiki root together with one topic below it.
///
/// Everything that turns text into triples or back needs both: the topic is
/// the subject of every statement, the root expands `:name` references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicScope {
    root: Iri,
    topic: Iri,
}

impl TopicScope {
    pub fn new(root: Iri, topic: Iri) -> Result<Self> {
        if topic.local_part(&root).is_none() {
            return Err(Error::NotFound(format!("{topic} is not below {root}")));
        }
        Ok(Self { root, topic })
    }

    pub fn root(&self) -> &Iri {
        &self.root
    }

    pub fn topic(&self) -> &Iri {
        &self.topic
    }

    /// The topic IRI relative to the root, e.g. `Home`.
    pub fn short_name(&self) -> &str {
        self.topic.local_part(&self.root).unwrap_or_default()
    }

    /// The topic as a triple subject.
    pub fn subject(&self) -> Term {
        Term::Iri(self.topic.clone())
    }

    pub fn wikitext_triple(&self, wikitext: impl Into<String>) -> Triple {
        Triple::new(self.topic.clone(), vocab::wikitext(), Literal::string(wikitext))
    }

    /// Wikitext of a topic that has never been written.
    pub fn initial_wikitext(&self) -> String {
        format!(
            "\nThis is topic :{} .\n*Edit* it to create it.\n",
            self.short_name()
        )
    }

    /// A topic's visible state: what is stored, or the placeholder wikitext
    /// when nothing is.
    pub fn fill_state(&self, stored: TripleSet) -> TripleSet {
        if !stored.is_empty() {
            return stored;
        }
        let mut state = TripleSet::new();
        state.insert(self.wikitext_triple(self.initial_wikitext()));
        state
    }
}
