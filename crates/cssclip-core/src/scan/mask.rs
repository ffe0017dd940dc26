//! Comment masking that keeps byte offsets stable.

/// Replaces every `/* ... */` comment with spaces of the same byte length.
///
/// String literals are respected, so `"/*"` inside quotes is not a comment.
/// Offsets into the masked text are valid offsets into the original.
pub(super) fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || c == '\n' {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str("  ");
                let mut prev_star = false;
                for inner in chars.by_ref() {
                    push_blank(&mut out, inner);
                    if prev_star && inner == '/' {
                        break;
                    }
                    prev_star = inner == '*';
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn push_blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}
