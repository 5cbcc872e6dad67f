//! HTML escaping for sanitizer output.
//!
//! - `escape_text()` - text content (`&`, `<`, `>`)
//! - `escape_attr()` - double-quoted attribute values

use std::borrow::Cow;

/// Characters that must be escaped in text content.
const TEXT_CHARS: [char; 3] = ['<', '>', '&'];

/// Characters that must be escaped inside a double-quoted attribute.
/// Single quotes pass through: output attributes are always double-quoted.
const ATTR_CHARS: [char; 4] = ['<', '>', '&', '"'];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Escape text content.
///
/// Quotes are left alone: they are only special inside attributes.
#[inline]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape_with(s, &TEXT_CHARS)
}

/// Escape HTML attribute values.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ATTR_CHARS)
}

/// Internal: escape with specified character set.
#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c).filter(|_| chars.contains(&c)) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
