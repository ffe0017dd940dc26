//! Reference scanner: locates `@import` rules and `url(...)` values in CSS text.
//!
//! Matching runs over a comment-masked copy of the text, so every span is a
//! valid byte range into the original and references inside comments are
//! never reported.

mod mask;
mod patterns;

use std::ops::Range;

use regex::Captures;

use crate::error::CaptureError;

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// An `@import` statement (the whole statement is the span).
    Import,
    /// A `url(...)` inside an `@font-face` block.
    FontUrl,
    /// Any other `url(...)`, typically an image.
    ImageUrl,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Import => "import",
            RefKind::FontUrl => "font",
            RefKind::ImageUrl => "image",
        }
    }
}

/// Quoting used around the reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
    None,
}

impl QuoteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStyle::Double => "double",
            QuoteStyle::Single => "single",
            QuoteStyle::None => "none",
        }
    }
}

/// One construct discovered in CSS text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: RefKind,
    /// Value exactly as written, without quotes.
    pub raw: String,
    /// Byte range in the scanned text.
    pub span: Range<usize>,
    pub quote: QuoteStyle,
    /// Media query list trailing an `@import`, if any.
    pub media: Option<String>,
}

/// Scans `text` and returns its references ordered by position.
pub fn scan(text: &str) -> Vec<Reference> {
    let masked = mask::mask_comments(text);
    let mut refs = Vec::new();

    let mut import_spans: Vec<Range<usize>> = Vec::new();
    for caps in patterns::import_regex().captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        let (raw, quote) = pick_value(
            &caps,
            &[
                (1, QuoteStyle::Double),
                (2, QuoteStyle::Single),
                (3, QuoteStyle::None),
                (4, QuoteStyle::Double),
                (5, QuoteStyle::Single),
            ],
        );
        let media = caps
            .get(6)
            .map(|m| m.as_str().trim())
            .filter(|m| !m.is_empty())
            .map(String::from);
        import_spans.push(whole.range());
        refs.push(Reference {
            kind: RefKind::Import,
            raw,
            span: whole.range(),
            quote,
            media,
        });
    }
    report_unsupported_imports(&masked, &import_spans);

    let font_blocks = font_face_blocks(&masked);
    for caps in patterns::url_regex().captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        let span = whole.range();
        if import_spans
            .iter()
            .any(|s| s.start <= span.start && span.end <= s.end)
        {
            continue;
        }
        let kind = if font_blocks.iter().any(|b| b.contains(&span.start)) {
            RefKind::FontUrl
        } else {
            RefKind::ImageUrl
        };
        let (raw, quote) = pick_value(
            &caps,
            &[
                (1, QuoteStyle::Double),
                (2, QuoteStyle::Single),
                (3, QuoteStyle::None),
            ],
        );
        refs.push(Reference {
            kind,
            raw,
            span,
            quote,
            media: None,
        });
    }

    refs.sort_by_key(|r| r.span.start);
    refs
}

fn pick_value(caps: &Captures<'_>, groups: &[(usize, QuoteStyle)]) -> (String, QuoteStyle) {
    groups
        .iter()
        .find_map(|(i, quote)| caps.get(*i).map(|m| (m.as_str().to_string(), *quote)))
        .unwrap_or((String::new(), QuoteStyle::None))
}

/// Logs every `@import` keyword that did not parse as a recognised statement.
fn report_unsupported_imports(masked: &str, import_spans: &[Range<usize>]) {
    for m in patterns::import_keyword_regex().find_iter(masked) {
        if import_spans.iter().any(|s| s.start == m.start()) {
            continue;
        }
        let tail = &masked[m.start()..];
        let end = tail.find([';', '\n']).map(|i| i + 1).unwrap_or(tail.len());
        let err = CaptureError::UnsupportedImportForm {
            statement: tail[..end].trim().to_string(),
        };
        tracing::debug!(offset = m.start(), "{err}; left unmodified");
    }
}

/// Byte ranges of `@font-face { ... }` blocks, braces included.
fn font_face_blocks(masked: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    for m in patterns::font_face_regex().find_iter(masked) {
        let mut depth = 0usize;
        let mut end = masked.len();
        for (i, b) in masked.as_bytes()[m.end() - 1..].iter().enumerate() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = m.end() - 1 + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        blocks.push(m.start()..end);
    }
    blocks
}
