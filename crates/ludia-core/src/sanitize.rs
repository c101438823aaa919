//! HTML sanitization for rendered user content.
//!
//! Every piece of user-supplied text (titles, descriptions, author names,
//! comment bodies) must pass through [`escape`] before it is interpolated
//! into displayed markup. Escaping is applied once per render, never chained:
//! escaping already-escaped text double-escapes, which is the intended
//! behavior, not a bug to guard against.

use std::borrow::Cow;

/// Escape the five markup-significant characters (`&`, `<`, `>`, `"`, `'`)
/// as character references. All other characters, including any Unicode
/// content, pass through unchanged. Never fails; empty input yields empty
/// output. Returns a borrowed `Cow` when nothing needed escaping.
pub fn escape(input: &str) -> Cow<'_, str> {
    let first = match input.find(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        Some(i) => i,
        None => return Cow::Borrowed(input),
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Escape an optional value; absent values are treated as empty text.
pub fn escape_opt(input: Option<&str>) -> Cow<'_, str> {
    match input {
        Some(text) => escape(text),
        None => Cow::Borrowed(""),
    }
}
