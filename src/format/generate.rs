//! Graph → text: keep a wikitext in step with triples added or removed
//! from the graph side.
//!
//! Added triples are appended as `pred->obj (auto)` lines below a
//! `----# auto` marker. Removed triples are banned: their auto lines are
//! deleted, remaining occurrences are reduced to their bare value text, and a
//! `# banned: pred->obj` comment records the retraction.

use crate::markup::ast::{LineKind, ParsedLine, Statement};
use crate::markup::lexer::{self, AUTO_MARKER, AUTO_TAG, BANNED_PREFIX};
use crate::markup::{self, parser};
use crate::model::{Iri, Literal, LiteralKind, Term, TopicScope, Triple, TripleSet};
use crate::{Error, Result};

use super::statement_triple;

/// Markup for a term, relative to `root`.
///
/// IRIs below the root compact to `:name` when the remainder is a valid
/// internal name. Strings are quoted, or written bare when quoting is
/// impossible and the bare token reads back as the same string. Strings
/// that fit neither form are rejected, as are blank nodes.
pub fn to_markup(term: &Term, root: &Iri) -> Result<String> {
    match term {
        Term::Iri(iri) => Ok(match iri.local_part(root) {
            Some(local) if parser::is_internal_name(local) => format!(":{local}"),
            _ => format!("<{}>", iri.as_str()),
        }),
        Term::Literal(lit) if lit.kind().is_bare() => Ok(lit.lexical().to_string()),
        Term::Literal(lit) => {
            let text = lit.lexical();
            if is_quotable(text) {
                Ok(format!("\"{text}\""))
            } else if is_bare_string(text) {
                Ok(text.to_string())
            } else {
                Err(Error::InvalidDataError(format!(
                    "string literal {text:?} can not be written as wikitext"
                )))
            }
        }
        Term::BlankNode(b) => Err(Error::InvalidDataError(format!(
            "can not handle blank node {b} in wikitext"
        ))),
    }
}

fn is_quotable(text: &str) -> bool {
    !text.is_empty()
        && !text.contains(['"', '\n', '\r'])
        && lexer::comment_start(text).is_none()
}

/// A token the parser reads back as the plain string `text`.
fn is_bare_string(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with('"')
        && !text.contains(char::is_whitespace)
        && parser::whole_link(text).is_none()
        && Literal::from_bare_token(text).kind() == LiteralKind::String
}

/// `pred->obj` for a triple about the scope's topic.
fn statement_markup(scope: &TopicScope, triple: &Triple) -> Result<String> {
    if triple.subject != scope.subject() {
        return Err(Error::UnsupportedSubjectError(format!(
            "{} is not {}",
            triple.subject,
            scope.topic()
        )));
    }
    Ok(format!(
        "{}->{}",
        to_markup(&Term::Iri(triple.predicate.clone()), scope.root())?,
        to_markup(&triple.object, scope.root())?
    ))
}

fn ensure_newline(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Append `triples` to `wikitext` as auto lines.
///
/// The marker is written once; later calls append below the existing one.
/// An empty set leaves the text untouched.
pub fn append_triples(scope: &TopicScope, wikitext: &str, triples: &TripleSet) -> Result<String> {
    let mut out = wikitext.to_string();
    if triples.is_empty() {
        return Ok(out);
    }
    let lines = triples
        .iter()
        .map(|t| statement_markup(scope, t))
        .collect::<Result<Vec<_>>>()?;

    ensure_newline(&mut out);
    if !lexer::has_auto_section(&out) {
        out.push('\n');
        out.push_str(AUTO_MARKER);
        out.push('\n');
    }
    for line in &lines {
        out.push_str(&format!("{line} {AUTO_TAG}\n"));
    }
    tracing::debug!(topic = %scope.topic(), appended = lines.len(), "auto lines appended");
    Ok(out)
}

/// Retract `triples` from `wikitext`.
pub fn ban_triples(scope: &TopicScope, wikitext: &str, triples: &TripleSet) -> Result<String> {
    let mut text = wikitext.to_string();
    for triple in triples {
        let markup = statement_markup(scope, triple)?;
        text = deactivate(scope, &text, triple);
        ensure_newline(&mut text);
        text.push_str(BANNED_PREFIX);
        text.push_str(&markup);
        text.push('\n');
    }
    if !triples.is_empty() {
        tracing::debug!(topic = %scope.topic(), banned = triples.len(), "statements banned");
    }
    Ok(text)
}

/// Remove every assertion of `triple` from `text`.
fn deactivate(scope: &TopicScope, text: &str, triple: &Triple) -> String {
    let asserts = |s: &Statement| statement_triple(scope, s).is_ok_and(|t| &t == triple);
    let mut kept = Vec::new();
    for line in markup::parse(text) {
        if line.kind != LineKind::Text {
            kept.push(line.raw.to_string());
            continue;
        }
        if auto_statement(&line).is_some_and(asserts) {
            continue;
        }
        let mut raw = line.raw.to_string();
        let hits: Vec<&Statement> = line.statements().filter(|s| asserts(s)).collect();
        for s in hits.iter().rev() {
            let value = &line.raw[s.value_span.start..s.value_span.end];
            raw.replace_range(s.span.start..s.span.end, value);
        }
        kept.push(raw);
    }
    kept.join("\n")
}

/// The statement of a `pred->obj (auto)` line.
fn auto_statement<'l>(line: &'l ParsedLine<'_>) -> Option<&'l Statement> {
    let body = line.content.trim_end().strip_suffix(AUTO_TAG)?.trim_end();
    let lead = body.len() - body.trim_start().len();
    let mut statements = line.statements();
    let statement = statements.next()?;
    let whole = statement.span.start == lead && statement.span.end == body.len();
    (whole && statements.next().is_none()).then_some(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::wikitext_to_triples;
    use crate::model::BlankNode;
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

    fn set(triples: impl IntoIterator<Item = Triple>) -> TripleSet {
        triples.into_iter().collect()
    }

    #[test]
    fn test_to_markup() {
        let root = iri("http://localhost/");
        let cases: [(Term, &str); 7] = [
            (iri("http://localhost/foo").into(), ":foo"),
            (iri("http://localhost/a/b_c").into(), ":a/b_c"),
            (iri("http://localhost/1st").into(), "<http://localhost/1st>"),
            (iri("http://a.com/x").into(), "<http://a.com/x>"),
            (Literal::integer(42).into(), "42"),
            (Literal::boolean(true).into(), "true"),
            (Literal::string("a b").into(), "\"a b\""),
        ];
        for (term, expected) in cases {
            assert_eq!(to_markup(&term, &root).unwrap(), expected);
        }
    }

    #[test]
    fn test_to_markup_rejects_unwritable() {
        let root = iri("http://localhost/");
        for text in ["", "say \"hi\"", "two\nlines", "a # b"] {
            assert!(to_markup(&Literal::string(text).into(), &root).is_err(), "{text:?}");
        }
        let blank: Term = BlankNode("b0".into()).into();
        assert!(matches!(to_markup(&blank, &root), Err(Error::InvalidDataError(_))));
    }

    #[test]
    fn test_unquotable_string_written_bare() {
        let scope = scope();
        let root = scope.root();
        assert_eq!(to_markup(&Literal::string("a\"b").into(), root).unwrap(), "a\"b");
        assert_eq!(to_markup(&Literal::string("#\"x").into(), root).unwrap(), "#\"x");
        for text in ["\"ab", "a\"b c", "<a\"b>"] {
            assert!(to_markup(&Literal::string(text).into(), root).is_err(), "{text:?}");
        }

        let t = about(&scope, "http://localhost/p", Literal::string("a\"b"));
        let text = append_triples(&scope, "", &set([t.clone()])).unwrap();
        assert!(wikitext_to_triples(&scope, &text).contains(&t));
        let text = ban_triples(&scope, "Size :p->a\"b here", &set([t])).unwrap();
        assert_eq!(text, "Size a\"b here\n# banned: :p->a\"b\n");
        assert!(wikitext_to_triples(&scope, &text).is_empty());
    }

    #[test]
    fn test_append_creates_marker_once() {
        let scope = scope();
        let first = append_triples(&scope, "Hello", &set([about(&scope, "http://localhost/p", Literal::integer(1))]))
            .unwrap();
        assert_eq!(first, "Hello\n\n----# auto\n:p->1 (auto)\n");
        let second = append_triples(&scope, &first, &set([about(&scope, "http://localhost/q", iri("http://localhost/Bob"))]))
            .unwrap();
        assert_eq!(second, "Hello\n\n----# auto\n:p->1 (auto)\n:q->:Bob (auto)\n");
    }

    #[test]
    fn test_append_empty_is_identity() {
        assert_eq!(append_triples(&scope(), "text", &TripleSet::new()).unwrap(), "text");
    }

    #[test]
    fn test_appended_triples_are_extracted() {
        let scope = scope();
        let added = set([
            about(&scope, "http://localhost/p", Literal::string("x y")),
            about(&scope, "http://xmlns.com/foaf/0.1/knows", iri("http://a.com/bob")),
        ]);
        let text = append_triples(&scope, "", &added).unwrap();
        assert_eq!(wikitext_to_triples(&scope, &text), added);
    }

    #[test]
    fn test_append_rejects_foreign_subject() {
        let scope = scope();
        let other = Triple::new(iri("http://localhost/Other"), iri("http://localhost/p"), Literal::integer(1));
        assert!(matches!(
            append_triples(&scope, "", &set([other])),
            Err(Error::UnsupportedSubjectError(_))
        ));
    }

    #[test]
    fn test_ban_inline_statement() {
        let scope = scope();
        let banned = set([about(&scope, "http://localhost/p", Literal::integer(1))]);
        let text = ban_triples(&scope, "See :p->1 here.", &banned).unwrap();
        assert_eq!(text, "See 1 here.\n# banned: :p->1\n");
        assert!(wikitext_to_triples(&scope, &text).is_empty());
    }

    #[test]
    fn test_ban_removes_auto_line() {
        let scope = scope();
        let t = about(&scope, "http://localhost/p", Literal::string("a b"));
        let text = append_triples(&scope, "Body", &set([t.clone()])).unwrap();
        let text = ban_triples(&scope, &text, &set([t])).unwrap();
        assert_eq!(text, "Body\n\n----# auto\n# banned: :p->\"a b\"\n");
    }

    #[test]
    fn test_ban_leaves_other_statements() {
        let scope = scope();
        let banned = set([about(&scope, "http://localhost/p", Literal::integer(1))]);
        let text = ban_triples(&scope, ":p->1 :p->2 :q->1", &banned).unwrap();
        let left = wikitext_to_triples(&scope, &text);
        assert_eq!(left.len(), 2);
        assert!(text.starts_with("1 :p->2 :q->1\n"));
    }
}
