/// Clean raw text into lowercase ASCII words separated by single spaces
///
/// Steps, in order:
/// 1. Drop every character that is neither an ASCII letter nor whitespace.
///    Nothing is inserted in its place, so `"full-stack"` becomes `"fullstack"`.
/// 2. Lowercase.
/// 3. Collapse whitespace runs to one space and trim both ends.
///
/// Whitespace is `char::is_whitespace` plus the ASCII information separators
/// U+001C to U+001F.
///
/// Pure and total; empty or letter-free input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_ascii_alphabetic() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c.to_ascii_lowercase());
        } else if is_separator(c) {
            pending_space = true;
        }
    }

    out
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
