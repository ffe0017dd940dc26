//! Resolution of raw reference values against a base URL.

use url::Url;

use crate::error::CaptureError;

/// Resolves `raw` against `base` using standard relative-URL rules.
///
/// Handles absolute, protocol-relative (`//host/p`), root-relative (`/p`) and
/// document-relative (`p`, `../p`) forms, with dot-segment removal. Query and
/// fragment of `raw` are preserved.
pub fn resolve_url(raw: &str, base: &str) -> Result<String, CaptureError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CaptureError::malformed(raw));
    }
    let base = Url::parse(base.trim()).map_err(|_| CaptureError::malformed(raw))?;
    let joined = base.join(value).map_err(|_| CaptureError::malformed(raw))?;
    Ok(joined.into())
}

/// True for values that live inside the stylesheet itself and are never
/// captured: `data:` URIs and fragment-only references such as `#clip`.
pub fn is_inline_reference(raw: &str) -> bool {
    let value = raw.trim_start();
    value.starts_with('#')
        || value
            .get(..5)
            .map_or(false, |p| p.eq_ignore_ascii_case("data:"))
}

/// Splits an absolute URL into the resource part and its fragment.
///
/// The fragment names a part of the resource (an SVG sprite entry, say), so
/// it does not make the resource distinct. Unparsable input is returned as is.
pub fn split_fragment(url: &str) -> (String, Option<String>) {
    match Url::parse(url) {
        Ok(mut parsed) => {
            let fragment = parsed.fragment().map(String::from);
            parsed.set_fragment(None);
            (parsed.into(), fragment)
        }
        Err(_) => (url.to_string(), None),
    }
}

/// True when `url` uses a scheme the capture can fetch (`http`, `https`, `file`).
pub fn is_capturable_scheme(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https" | "file"))
        .unwrap_or(false)
}
