//! Span-based rewriting of CSS text.

use std::ops::Range;

/// Replace `span` of the original text with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Replacement {
    pub span: Range<usize>,
    pub text: String,
}

/// Value written in place of a reference whose kind is not captured.
pub(super) const EMPTY_URL: &str = r#"url("")"#;

/// `url("<path>")` with `"` and `\` escaped.
pub(super) fn css_url(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 7);
    out.push_str("url(\"");
    for c in path.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\")");
    out
}

/// `@import url("<path>");`, dropping any media list.
pub(super) fn import_statement(path: &str) -> String {
    format!("@import {};", css_url(path))
}

/// Applies replacements in a single left-to-right pass over `text`.
///
/// Replacements are ordered by span start; one that overlaps an earlier one
/// is dropped. Text outside the spans is copied unchanged, so identical
/// literals elsewhere in the text are never touched.
pub(super) fn apply(text: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|r| r.span.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for r in ordered {
        if r.span.start < cursor || r.span.end > text.len() {
            tracing::debug!(
                start = r.span.start,
                end = r.span.end,
                "overlapping replacement dropped"
            );
            continue;
        }
        out.push_str(&text[cursor..r.span.start]);
        out.push_str(&r.text);
        cursor = r.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(span: Range<usize>, text: &str) -> Replacement {
        Replacement {
            span,
            text: text.to_string(),
        }
    }

    #[test]
    fn replaces_spans_in_order() {
        let text = "a url(x) b url(x) c";
        let out = apply(text, &[rep(11..17, "url(\"2\")"), rep(2..8, "url(\"1\")")]);
        assert_eq!(out, "a url(\"1\") b url(\"2\") c");
    }

    #[test]
    fn overlapping_replacement_is_dropped() {
        let out = apply("0123456789", &[rep(2..6, "X"), rep(4..8, "Y")]);
        assert_eq!(out, "01X6789");
    }

    #[test]
    fn no_replacements_is_identity() {
        assert_eq!(apply("body{}", &[]), "body{}");
    }

    #[test]
    fn quoting() {
        assert_eq!(css_url("assets/001-1.woff"), r#"url("assets/001-1.woff")"#);
        assert_eq!(css_url(r#"a"b"#), r#"url("a\"b")"#);
        assert_eq!(import_statement("001-2.css"), r#"@import url("001-2.css");"#);
    }
}
