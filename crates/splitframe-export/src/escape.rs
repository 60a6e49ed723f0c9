//! Escaping for the three output languages.
//!
//! Every user-supplied string that reaches HTML, CSS or JavaScript output
//! passes through one of these helpers first.

use std::fmt::Write;

/// HTML-escape a string into the output buffer.
pub(crate) fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Write `s` as a CSS identifier, usable after `#` or `.` in a selector.
///
/// Follows the CSSOM `serialize an identifier` rules: NUL becomes U+FFFD,
/// control characters and a leading digit become hex escapes, and any other
/// ASCII character outside `[A-Za-z0-9_-]` is backslash-escaped.
pub(crate) fn css_escape_ident_into(out: &mut String, s: &str) {
    let first = s.chars().next();
    for (index, c) in s.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => {
                let _ = write!(out, "\\{:x} ", u32::from(c));
            }
            '0'..='9' if index == 0 || (index == 1 && first == Some('-')) => {
                let _ = write!(out, "\\{:x} ", u32::from(c));
            }
            '-' if index == 0 && s.len() == 1 => out.push_str("\\-"),
            c if !c.is_ascii() || c.is_ascii_alphanumeric() || c == '-' || c == '_' => {
                out.push(c);
            }
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
}

/// True when `value` can sit on the right of a CSS declaration without
/// ending it, opening a block or string, or leaving the `<style>` element.
#[must_use]
pub(crate) fn is_safe_css_value(value: &str) -> bool {
    !value.trim().is_empty()
        && !value.contains("/*")
        && !value.chars().any(|c| {
            c.is_control() || matches!(c, ';' | '{' | '}' | '<' | '>' | '\\' | '"' | '\'')
        })
}

/// Escape a value for a single-quoted JavaScript string literal.
pub(crate) fn js_string_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
}

/// Escape JSX child text so it stays literal.
pub(crate) fn jsx_text_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

/// Reduce `name` to a JavaScript identifier.
///
/// Characters outside `[A-Za-z0-9_$]` become `_` and a leading digit gets a
/// `_` prefix. A name with nothing usable in it yields `fallback`.
#[must_use]
pub(crate) fn js_identifier(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return fallback.to_string();
    }
    let mut ident = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    ident.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            c
        } else {
            '_'
        }
    }));
    ident
}
