//! # Reconciliation
//!
//! Turns a candidate triple set for one topic into the state to store, or
//! refuses it. Which view is authoritative depends on what the edit touched:
//!
//! | Plan | Candidate | Action |
//! |------|-----------|--------|
//! | `TextFirst` | only a wikitext | parse it, add the parsed triples |
//! | `CheckConsistency` | other triples, wikitext changed | parsed text must equal the candidate |
//! | `TriplesFirst` | other triples, wikitext absent or unchanged | append / ban to rewrite the wikitext |
//! | `Defer` | several wikitexts, or a non-literal one | nothing; validation refuses it |

use crate::format::{append_triples, ban_triples, wikitext_to_triples};
use crate::format::extract::extract_into;
use crate::model::{vocab, Literal, Term, TopicScope, TripleSet};
use crate::{Error, Result};

/// Reconciliation chosen for an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    Defer,
    TextFirst { text: String },
    CheckConsistency { text: String },
    TriplesFirst { text: Option<String> },
}

impl EditPlan {
    /// Classify `candidate` against the topic's `stored` state.
    pub fn decide(scope: &TopicScope, stored: &TripleSet, candidate: &TripleSet) -> EditPlan {
        let subject = scope.subject();
        let predicate = vocab::wikitext();
        let mut texts = candidate.objects(&subject, &predicate);
        let text = match (texts.next(), texts.next()) {
            (None, _) => None,
            (Some(Term::Literal(lit)), None) => Some(lit.lexical().to_string()),
            _ => return EditPlan::Defer,
        };
        match text {
            Some(text) if candidate.len() == 1 => EditPlan::TextFirst { text },
            Some(text) if Some(text.as_str()) != stored_text(stored, scope) => {
                EditPlan::CheckConsistency { text }
            }
            text => EditPlan::TriplesFirst { text },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditPlan::Defer => "defer",
            EditPlan::TextFirst { .. } => "text-first",
            EditPlan::CheckConsistency { .. } => "check-consistency",
            EditPlan::TriplesFirst { .. } => "triples-first",
        }
    }
}

fn stored_text<'s>(stored: &'s TripleSet, scope: &TopicScope) -> Option<&'s str> {
    stored
        .value(&scope.subject(), &vocab::wikitext())
        .and_then(Term::as_literal)
        .map(Literal::lexical)
}

/// Complete `candidate` into the state to store, in place.
///
/// `stored` is the topic's current state, placeholder included for a topic
/// never written. Fails with `InconsistentDataError` when a changed wikitext
/// and the accompanying triples disagree; generation errors (blank nodes,
/// unwritable literals) are passed on. Additions about other subjects or with
/// blank nodes are left in place for validation to refuse. On error `candidate`
/// may be partly completed and must be discarded.
pub fn complete_new_graph(
    scope: &TopicScope,
    stored: &TripleSet,
    candidate: &mut TripleSet,
) -> Result<()> {
    let plan = EditPlan::decide(scope, stored, candidate);
    tracing::debug!(topic = %scope.topic(), plan = plan.name(), "reconciling edit");
    match plan {
        EditPlan::Defer => Ok(()),
        EditPlan::TextFirst { text } => {
            extract_into(scope, &text, candidate);
            Ok(())
        }
        EditPlan::CheckConsistency { text } => {
            let mut from_text = wikitext_to_triples(scope, &text);
            from_text.insert(scope.wikitext_triple(text));
            if from_text != *candidate {
                let diff = from_text.diff(candidate);
                return Err(Error::InconsistentDataError(format!(
                    "wikitext and triples are inconsistent ({} only in text, {} only in triples)",
                    diff.only_left.len(),
                    diff.only_right.len()
                )));
            }
            Ok(())
        }
        EditPlan::TriplesFirst { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let text = stored_text(stored, scope).unwrap_or_default().to_string();
                    candidate.insert(scope.wikitext_triple(text.clone()));
                    text
                }
            };
            let diff = candidate.diff(stored);
            tracing::debug!(
                topic = %scope.topic(),
                added = diff.only_left.len(),
                removed = diff.only_right.len(),
                "triples-first edit"
            );
            if diff.is_empty() {
                return Ok(());
            }
            let subject = scope.subject();
            if diff.only_left.iter().any(|t| t.has_blank() || t.subject != subject) {
                // Not writable as wikitext; validation refuses the candidate.
                return Ok(());
            }
            let mut updated = append_triples(scope, &text, &diff.only_left)?;
            updated = ban_triples(scope, &updated, &diff.only_right)?;
            candidate.set(scope.subject(), vocab::wikitext(), Term::Literal(Literal::string(updated)));
            Ok(())
        }
    }
}

/// Functional form of [`complete_new_graph`].
pub fn reconcile(scope: &TopicScope, stored: &TripleSet, mut candidate: TripleSet) -> Result<TripleSet> {
    complete_new_graph(scope, stored, &mut candidate)?;
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlankNode, Iri, Triple};
    use pretty_assertions::assert_eq;

    fn scope() -> TopicScope {
        TopicScope::new(
            Iri::new("http://localhost/").unwrap(),
            Iri::new("http://localhost/Home").unwrap(),
        )
        .unwrap()
    }

    fn iri(s: &str) -> Iri {
        Iri::new(s).unwrap()
    }

    fn about(scope: &TopicScope, pred: &str, obj: impl Into<Term>) -> Triple {
        Triple::new(scope.subject(), iri(pred), obj)
    }

    fn text_of(scope: &TopicScope, set: &TripleSet) -> String {
        stored_text(set, scope).unwrap().to_string()
    }

    fn stored_with(scope: &TopicScope, text: &str) -> TripleSet {
        reconcile(scope, &scope.fill_state(TripleSet::new()), [scope.wikitext_triple(text)].into_iter().collect())
            .unwrap()
    }

    #[test]
    fn test_decide() {
        let scope = scope();
        let stored = stored_with(&scope, ":p->1");
        let only_text: TripleSet = [scope.wikitext_triple("new")].into_iter().collect();
        assert_eq!(EditPlan::decide(&scope, &stored, &only_text).name(), "text-first");

        let mut changed = only_text.clone();
        changed.insert(about(&scope, "http://localhost/p", Literal::integer(1)));
        assert_eq!(EditPlan::decide(&scope, &stored, &changed).name(), "check-consistency");

        assert_eq!(EditPlan::decide(&scope, &stored, &stored).name(), "triples-first");
        assert_eq!(EditPlan::decide(&scope, &stored, &TripleSet::new()).name(), "triples-first");

        let mut two = only_text;
        two.insert(scope.wikitext_triple("other"));
        assert_eq!(EditPlan::decide(&scope, &stored, &two), EditPlan::Defer);
    }

    #[test]
    fn test_text_first_adds_parsed_triples() {
        let scope = scope();
        let state = stored_with(&scope, ":name->\"John Doe\" :age->42 # :not->:parsed");
        assert_eq!(state.len(), 3);
        assert!(state.contains(&about(&scope, "http://localhost/name", Literal::string("John Doe"))));
        assert!(state.contains(&about(&scope, "http://localhost/age", Literal::integer(42))));
    }

    #[test]
    fn test_consistent_text_and_triples_accepted() {
        let scope = scope();
        let stored = stored_with(&scope, "old");
        let candidate = stored_with(&scope, "now :p->1");
        let accepted = reconcile(&scope, &stored, candidate.clone()).unwrap();
        assert_eq!(accepted, candidate);
    }

    #[test]
    fn test_inconsistent_text_and_triples_rejected() {
        let scope = scope();
        let stored = stored_with(&scope, "old");
        let mut candidate = stored_with(&scope, ":p->1");
        candidate.insert(about(&scope, "http://localhost/q", Literal::integer(2)));
        let err = reconcile(&scope, &stored, candidate).unwrap_err();
        assert!(matches!(err, Error::InconsistentDataError(_)));
    }

    #[test]
    fn test_triples_first_appends() {
        let scope = scope();
        let stored = stored_with(&scope, "Hello");
        let mut candidate = stored.clone();
        candidate.insert(about(&scope, "http://www.w3.org/2000/01/rdf-schema#label", Literal::string("Home page")));
        let accepted = reconcile(&scope, &stored, candidate).unwrap();
        assert_eq!(
            text_of(&scope, &accepted),
            "Hello\n\n----# auto\n<http://www.w3.org/2000/01/rdf-schema#label>->\"Home page\" (auto)\n"
        );
        assert_eq!(accepted.len(), 2);
    }

    #[test]
    fn test_triples_first_without_text_keeps_stored_text() {
        let scope = scope();
        let stored = stored_with(&scope, "See :p->1 here.");
        let mut candidate = stored.clone();
        candidate.remove_matching(&scope.subject(), &vocab::wikitext());
        candidate.remove(&about(&scope, "http://localhost/p", Literal::integer(1)));
        let accepted = reconcile(&scope, &stored, candidate).unwrap();
        assert_eq!(text_of(&scope, &accepted), "See 1 here.\n# banned: :p->1\n");
        assert_eq!(accepted.len(), 1);
    }

    #[test]
    fn test_unchanged_candidate_is_untouched() {
        let scope = scope();
        let stored = stored_with(&scope, ":p->1");
        assert_eq!(reconcile(&scope, &stored, stored.clone()).unwrap(), stored);
    }

    #[test]
    fn test_unwritable_additions_left_to_validation() {
        let scope = scope();
        let stored = stored_with(&scope, "x");
        let mut candidate = stored.clone();
        candidate.insert(about(&scope, "http://localhost/p", BlankNode("b".into())));
        assert_eq!(reconcile(&scope, &stored, candidate.clone()).unwrap(), candidate);

        let mut candidate = stored.clone();
        candidate.insert(Triple::new(iri("http://localhost/Other"), iri("http://localhost/p"), Literal::integer(1)));
        assert_eq!(reconcile(&scope, &stored, candidate.clone()).unwrap(), candidate);
    }

    #[test]
    fn test_unwritable_literal_fails() {
        let scope = scope();
        let stored = stored_with(&scope, "x");
        let mut candidate = stored.clone();
        candidate.insert(about(&scope, "http://localhost/p", Literal::string("say \"hi\"")));
        assert!(matches!(reconcile(&scope, &stored, candidate), Err(Error::InvalidDataError(_))));
    }
}
