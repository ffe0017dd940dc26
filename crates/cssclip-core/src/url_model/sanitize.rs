//! Name-segment sanitization for asset names.

/// Sanitizes a value (typically a clip id) for use as a single name segment.
///
/// - Replaces NUL, `/`, `\`, `.`, whitespace and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing underscores
/// - Limits length to 64 bytes
pub fn sanitize_name_segment(name: &str) -> String {
    const SEGMENT_MAX: usize = 64;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let unsafe_char =
            matches!(c, '\0' | '/' | '\\' | '.') || c.is_control() || c.is_whitespace();
        let replacement = if unsafe_char { '_' } else { c };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches('_');

    if trimmed.len() > SEGMENT_MAX {
        let mut take = SEGMENT_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
