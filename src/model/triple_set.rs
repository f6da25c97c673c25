//! TripleSet: an ordered set of triples, and set differences between two.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Iri, Term, Triple};

/// A set of triples.
///
/// Ordered so that anything derived from iterating it (generated markup,
/// exports) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleSet {
    triples: BTreeSet<Triple>,
}

/// Result of comparing two triple sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleDiff {
    pub common: TripleSet,
    pub only_left: TripleSet,
    pub only_right: TripleSet,
}

impl TripleDiff {
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the triple was not present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All objects of `(subject, predicate, *)`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// The first object of `(subject, predicate, *)`, if any.
    pub fn value(&self, subject: &Term, predicate: &Iri) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Remove every `(subject, predicate, *)`.
    pub fn remove_matching(&mut self, subject: &Term, predicate: &Iri) {
        self.triples
            .retain(|t| !(&t.subject == subject && &t.predicate == predicate));
    }

    /// Replace every `(subject, predicate, *)` with a single triple.
    pub fn set(&mut self, subject: Term, predicate: Iri, object: Term) {
        self.remove_matching(&subject, &predicate);
        self.insert(Triple { subject, predicate, object });
    }

    /// Triples whose subject is `subject`.
    pub fn about(&self, subject: &Term) -> TripleSet {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject)
            .cloned()
            .collect()
    }

    /// Split `self` and `other` into their intersection and one-sided parts.
    ///
    /// Terms carry no anonymous nodes worth matching up, so this is plain
    /// set comparison.
    pub fn diff(&self, other: &TripleSet) -> TripleDiff {
        TripleDiff {
            common: self.triples.intersection(&other.triples).cloned().collect(),
            only_left: self.triples.difference(&other.triples).cloned().collect(),
            only_right: other.triples.difference(&self.triples).cloned().collect(),
        }
    }
}

impl FromIterator<Triple> for TripleSet {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self { triples: iter.into_iter().collect() }
    }
}

impl Extend<Triple> for TripleSet {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl IntoIterator for TripleSet {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
