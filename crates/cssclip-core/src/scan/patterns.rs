//! Compiled patterns for the reference scanner.

use regex::Regex;
use std::sync::OnceLock;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid scanner regex {pattern:?}: {e}"))
}

/// `@import url(X) media;`, `@import "X" media;`, `@import 'X' media;`.
///
/// Groups: 1 url-double, 2 url-single, 3 url-bare, 4 double, 5 single, 6 media.
pub(super) fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?i)@import\s*(?:url\(\s*(?:"([^"]*)"|'([^']*)'|([^"')\s]*))\s*\)|"([^"]*)"|'([^']*)')([^;{}]*)(?:;|\z)"#,
        )
    })
}

/// Any `@import` keyword, recognised or not.
pub(super) fn import_keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?i)@import\b"))
}

/// `url(X)` with double, single or no quotes. Groups: 1 double, 2 single, 3 bare.
pub(super) fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?i)\burl\(\s*(?:"([^"]*)"|'([^']*)'|([^"')\s]*))\s*\)"#))
}

/// Opening of an `@font-face` block, up to and including `{`.
pub(super) fn font_face_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?i)@font-face\s*\{"))
}
