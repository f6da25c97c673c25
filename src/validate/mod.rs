//! # Validation
//!
//! Ordered pipeline of independent checks run on the completed candidate of
//! an edit, just before it is stored. Each validator reports violations into
//! a shared [`Diagnosis`]; an empty diagnosis lets the edit through.
//!
//! | # | Validator | Refuses | Error |
//! |---|-----------|---------|-------|
//! | 1 | `SubjectValidator` | triples about anything but the topic, blank nodes | `UnsupportedSubjectError` |
//! | 2 | `CardinalityValidator` | zero or several wikitexts | `CardinalityError` |
//! | 3 | `TypedPropertyValidator` | a wikitext that is not a string literal | `InvalidDataError` |
//! | 4 | `ReservedNamespaceValidator` | unknown or non-editable vocabulary terms | `InvalidDataError` |

use std::fmt;

use smallvec::SmallVec;

use crate::model::{vocab, LiteralKind, Term, TopicScope, TripleSet, Vocab};
use crate::{Error, Result};

// ============================================================================
// Diagnosis
// ============================================================================

/// Category of a violation; picks the error an edit fails with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Subject,
    Cardinality,
    TypedProperty,
    ReservedNamespace,
}

/// One problem found in a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Name of the validator that reported it.
    pub validator: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.validator, self.message)
    }
}

/// Everything the pipeline found wrong with a candidate.
#[derive(Debug, Clone, Default)]
pub struct Diagnosis {
    violations: SmallVec<[Violation; 2]>,
}

impl Diagnosis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ViolationKind, validator: &'static str, message: impl Into<String>) {
        self.violations.push(Violation { kind, validator, message: message.into() });
    }

    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// `Ok` when nothing was found; otherwise the error for the first
    /// violation, with every violation in the message.
    pub fn into_result(self) -> Result<()> {
        let Some(first) = self.violations.first() else {
            return Ok(());
        };
        let message = self
            .violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(match first.kind {
            ViolationKind::Subject => Error::UnsupportedSubjectError(message),
            ViolationKind::Cardinality => Error::CardinalityError(message),
            ViolationKind::TypedProperty | ViolationKind::ReservedNamespace => {
                Error::InvalidDataError(message)
            }
        })
    }
}

// ============================================================================
// Validators
// ============================================================================

/// A single check over a topic's candidate triples.
pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, scope: &TopicScope, graph: &TripleSet, diagnosis: &mut Diagnosis);
}

/// Every triple is about the topic; no blank nodes anywhere.
pub struct SubjectValidator;

impl Validator for SubjectValidator {
    fn name(&self) -> &'static str {
        "subject"
    }

    fn check(&self, scope: &TopicScope, graph: &TripleSet, diagnosis: &mut Diagnosis) {
        let topic = scope.subject();
        for triple in graph.iter() {
            if triple.has_blank() {
                diagnosis.push(ViolationKind::Subject, self.name(), format!("blank node not supported: {triple}"));
            } else if triple.subject != topic {
                diagnosis.push(ViolationKind::Subject, self.name(), format!("wrong subject {}", triple.subject));
            }
        }
    }
}

/// Exactly one wikitext.
pub struct CardinalityValidator;

impl Validator for CardinalityValidator {
    fn name(&self) -> &'static str {
        "cardinality"
    }

    fn check(&self, scope: &TopicScope, graph: &TripleSet, diagnosis: &mut Diagnosis) {
        let count = graph.objects(&scope.subject(), &vocab::wikitext()).count();
        if count != 1 {
            diagnosis.push(
                ViolationKind::Cardinality,
                self.name(),
                format!("expected exactly one wikitext, found {count}"),
            );
        }
    }
}

/// The wikitext is a string literal.
pub struct TypedPropertyValidator;

impl Validator for TypedPropertyValidator {
    fn name(&self) -> &'static str {
        "typed-property"
    }

    fn check(&self, scope: &TopicScope, graph: &TripleSet, diagnosis: &mut Diagnosis) {
        for object in graph.objects(&scope.subject(), &vocab::wikitext()) {
            let is_string = matches!(object, Term::Literal(lit) if lit.kind() == LiteralKind::String);
            if !is_string {
                diagnosis.push(
                    ViolationKind::TypedProperty,
                    self.name(),
                    format!("wikitext must be a string literal, got {object}"),
                );
            }
        }
    }
}

/// Vocabulary terms are known, and `sw:wikitext` is the only one a topic
/// may carry as a predicate.
pub struct ReservedNamespaceValidator;

impl Validator for ReservedNamespaceValidator {
    fn name(&self) -> &'static str {
        "reserved-namespace"
    }

    fn check(&self, _scope: &TopicScope, graph: &TripleSet, diagnosis: &mut Diagnosis) {
        for triple in graph.iter() {
            match Vocab::from_iri(&triple.predicate) {
                Ok(None) | Ok(Some(Vocab::Wikitext)) => {}
                Ok(Some(term)) => diagnosis.push(
                    ViolationKind::ReservedNamespace,
                    self.name(),
                    format!("sw:{} is not editable on a topic", term.local_name()),
                ),
                Err(e) => diagnosis.push(ViolationKind::ReservedNamespace, self.name(), e.to_string()),
            }
            if let Some(Err(e)) = triple.object.as_iri().map(Vocab::from_iri) {
                diagnosis.push(ViolationKind::ReservedNamespace, self.name(), e.to_string());
            }
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Validators run in order; all of them always run.
pub struct Pipeline {
    validators: Vec<Box<dyn Validator>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { validators: Vec::new() }
    }

    /// The checks every topic edit goes through.
    pub fn standard() -> Self {
        Self::new()
            .with(SubjectValidator)
            .with(CardinalityValidator)
            .with(TypedPropertyValidator)
            .with(ReservedNamespaceValidator)
    }

    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn run(&self, scope: &TopicScope, graph: &TripleSet) -> Diagnosis {
        let mut diagnosis = Diagnosis::new();
        for validator in &self.validators {
            validator.check(scope, graph, &mut diagnosis);
        }
        diagnosis
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run the standard pipeline on a completed candidate.
pub fn diagnose(scope: &TopicScope, graph: &TripleSet) -> Diagnosis {
    Pipeline::standard().run(scope, graph)
}

/// Refuse a candidate that fails any standard check.
pub fn check_new_graph(scope: &TopicScope, graph: &TripleSet) -> Result<()> {
    diagnose(scope, graph).into_result()
}
