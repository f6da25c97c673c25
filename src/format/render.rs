//! Text → HTML fragment.
//!
//! Line structure is preserved: rendered lines are joined with `\n`, comment
//! lines disappear, rules become `<hr>`. Statements render as their value
//! followed by a `*` linking to the predicate.

use crate::markup::ast::{Inline, LineKind, Link, Value};
use crate::markup;
use crate::model::Iri;

/// Render `wikitext` as an HTML fragment, resolving `:name` against `root`.
///
/// Never fails; text is escaped, markup never leaks through unescaped.
pub fn wikitext_to_html(wikitext: &str, root: &Iri) -> String {
    let mut rendered = Vec::new();
    for line in markup::parse(wikitext) {
        match line.kind {
            LineKind::Comment => continue,
            LineKind::Rule => rendered.push("<hr>".to_string()),
            LineKind::Text => {
                let mut html = String::with_capacity(line.content.len());
                for inline in &line.inlines {
                    render_inline(&mut html, inline, root);
                }
                rendered.push(html);
            }
        }
    }
    rendered.join("\n")
}

fn render_inline(out: &mut String, inline: &Inline, root: &Iri) {
    match inline {
        Inline::Text(text) => out.push_str(&escape(text)),
        Inline::Emphasis(text) => {
            out.push_str("<em>");
            out.push_str(&escape(text));
            out.push_str("</em>");
        }
        Inline::Link(link) => render_link(out, link, root),
        Inline::Statement(statement) => {
            match &statement.value {
                Value::Link(link) => render_link(out, link, root),
                Value::Bare(text) | Value::Quoted(text) => out.push_str(&escape(text)),
            }
            anchor(out, &href(&statement.predicate, root), "*");
        }
    }
}

fn render_link(out: &mut String, link: &Link, root: &Iri) {
    let target = href(link, root);
    match link {
        Link::Internal(name) => anchor(out, &target, &escape(name)),
        Link::External(uri) => {
            out.push_str("&lt;");
            anchor(out, &target, &escape(uri));
            out.push_str("&gt;");
        }
    }
}

fn href(link: &Link, root: &Iri) -> String {
    match link {
        Link::Internal(name) => escape(&format!("{}{name}", root.as_str())),
        Link::External(uri) => escape(uri),
    }
}

fn anchor(out: &mut String, href: &str, body: &str) {
    out.push_str("<a href='");
    out.push_str(href);
    out.push_str("'>");
    out.push_str(body);
    out.push_str("</a>");
}

/// Escape text for HTML content and single-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
