//! Media types a topic is exchanged in.
//!
//! | Type | Ext | Direction |
//! |------|-----|-----------|
//! | `text/plain` | `txt` | the wikitext, both ways |
//! | `text/html` | `html` | rendered page, read-only |

use std::sync::LazyLock;

use crate::format::render::{escape, wikitext_to_html};
use crate::model::{vocab, Term, TopicScope, TripleSet};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    PlainText,
    Html,
}

impl MediaType {
    /// In order of preference.
    pub const ALL: [MediaType; 2] = [MediaType::PlainText, MediaType::Html];

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::PlainText => "text/plain",
            MediaType::Html => "text/html",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::PlainText => "txt",
            MediaType::Html => "html",
        }
    }

    /// Accepts parameters (`text/plain; charset=utf-8`).
    pub fn from_mime(mime: &str) -> Option<MediaType> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL.into_iter().find(|m| m.mime().eq_ignore_ascii_case(essence))
    }

    pub fn from_extension(ext: &str) -> Option<MediaType> {
        Self::ALL.into_iter().find(|m| m.extension() == ext)
    }

    /// Whether a body in this type can be turned back into triples.
    pub fn is_parseable(&self) -> bool {
        matches!(self, MediaType::PlainText)
    }
}

// ============================================================================
// text/plain
// ============================================================================

fn wikitext_of<'s>(state: &'s TripleSet, scope: &TopicScope) -> &'s str {
    match state.value(&scope.subject(), &vocab::wikitext()) {
        Some(Term::Literal(lit)) => lit.lexical(),
        _ => "",
    }
}

/// The topic's wikitext as UTF-8; empty when it has none.
pub fn serialize_wikitext(state: &TripleSet, scope: &TopicScope) -> Vec<u8> {
    wikitext_of(state, scope).as_bytes().to_vec()
}

/// A plain-text body as the candidate state "this is the new wikitext".
pub fn parse_wikitext(body: &[u8], scope: &TopicScope) -> Result<TripleSet> {
    let text = std::str::from_utf8(body)
        .map_err(|e| Error::InvalidDataError(format!("wikitext is not UTF-8: {e}")))?;
    let mut graph = TripleSet::new();
    graph.insert(scope.wikitext_triple(text));
    Ok(graph)
}

// ============================================================================
// text/html
// ============================================================================

const CLIENT_SCRIPT_TEMPLATE: &str = r#"<script>
(function () {
  var editor = document.getElementById("editor");
  var ctype = document.getElementById("ctype");
  ctype.value = "$DEFAULT_TYPE";
  document.getElementById("save").onclick = function () {
    var req = new XMLHttpRequest();
    req.open("PUT", document.location.href.replace(/\.html$/, ""));
    req.setRequestHeader("content-type", ctype.value);
    req.onload = function () { document.location.reload(); };
    req.send(editor.value);
  };
})();
</script>
"#;

/// Editing script, with plain text as the default editing type.
static CLIENT_SCRIPT: LazyLock<String> = LazyLock::new(|| {
    CLIENT_SCRIPT_TEMPLATE.replace("$DEFAULT_TYPE", MediaType::PlainText.mime())
});

pub fn client_script() -> &'static str {
    &CLIENT_SCRIPT
}

/// `<h1>` breadcrumbs: the wiki root, then each segment of the topic name.
fn crumbs(scope: &TopicScope) -> String {
    let root = scope.root().as_str();
    let mut html = format!("<a href='{}'>{}</a>", escape(root), escape(root));
    let mut path = String::new();
    for segment in scope.short_name().split('/').filter(|s| !s.is_empty()) {
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(segment);
        html.push_str(&format!(" / <a href='{}'>{}</a>", escape(&format!("{root}{path}")), escape(segment)));
    }
    html
}

fn formats(scope: &TopicScope) -> String {
    let topic = scope.topic().as_str();
    let links: Vec<String> = MediaType::ALL
        .iter()
        .map(|m| format!("<a href='{}.{ext}'>{ext}</a>", escape(topic), ext = m.extension()))
        .collect();
    format!("<div class='formats'>Formats: {}</div>\n", links.join(" "))
}

/// The topic as an HTML page.
pub fn serialize_html(state: &TripleSet, scope: &TopicScope) -> String {
    let wikitext = wikitext_of(state, scope);
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n");
    page.push_str(&format!("<title>{}</title>\n", escape(scope.short_name())));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>{}</h1>\n", crumbs(scope)));
    page.push_str(&formats(scope));
    page.push_str(&format!("<pre>\n{}</pre>\n", wikitext_to_html(wikitext, scope.root())));
    page.push_str(&format!(
        "<textarea id='editor'>{}</textarea>\n<select id='ctype'><option>{}</option></select>\n<button id='save'>Save</button>\n",
        escape(wikitext),
        MediaType::PlainText.mime()
    ));
    page.push_str(client_script());
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Iri;

    fn scope(topic: &str) -> TopicScope {
        TopicScope::new(Iri::new("http://localhost/").unwrap(), Iri::new(topic).unwrap()).unwrap()
    }

    #[test]
    fn test_media_type_lookup() {
        assert_eq!(MediaType::from_mime("text/plain; charset=utf-8"), Some(MediaType::PlainText));
        assert_eq!(MediaType::from_mime("TEXT/HTML"), Some(MediaType::Html));
        assert_eq!(MediaType::from_mime("text/turtle"), None);
        assert_eq!(MediaType::from_extension("txt"), Some(MediaType::PlainText));
        assert!(!MediaType::Html.is_parseable());
    }

    #[test]
    fn test_plain_text_both_ways() {
        let scope = scope("http://localhost/Home");
        let graph = parse_wikitext("héllo :p->1".as_bytes(), &scope).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(serialize_wikitext(&graph, &scope), "héllo :p->1".as_bytes());
        assert!(serialize_wikitext(&TripleSet::new(), &scope).is_empty());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let scope = scope("http://localhost/Home");
        assert!(matches!(parse_wikitext(&[0xff, 0xfe], &scope), Err(Error::InvalidDataError(_))));
    }

    #[test]
    fn test_script_defaults_to_plain_text() {
        assert!(client_script().contains("ctype.value = \"text/plain\";"));
        assert!(!client_script().contains("$DEFAULT_TYPE"));
    }

    #[test]
    fn test_html_page() {
        let scope = scope("http://localhost/a/b");
        let graph = parse_wikitext(b"*hi* :foo", &scope).unwrap();
        let page = serialize_html(&graph, &scope);
        assert!(page.contains("<a href='http://localhost/a'>a</a> / <a href='http://localhost/a/b'>b</a>"));
        assert!(page.contains("<a href='http://localhost/a/b.txt'>txt</a>"));
        assert!(page.contains("<pre>\n<em>hi</em> <a href='http://localhost/foo'>foo</a></pre>"));
        assert!(page.contains("<textarea id='editor'>*hi* :foo</textarea>"));
    }
}
