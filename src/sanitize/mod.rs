//! Allow-list HTML sanitizer.
//!
//! ```text
//! sanitize/
//! ├── token    # Tokenizer: FSM producing Text/Open/Close/Comment tokens
//! ├── entity   # single-pass decoding of &nbsp; &amp; &lt; &gt; &quot;
//! └── href     # is_safe_href: absolute http/https/mailto/tel only
//! ```
//!
//! [`sanitize`] keeps only `a, b, strong, i, em, u, mark, code, br`, keeps the
//! text of everything else, and always returns well-nested markup whose text
//! is re-escaped. It never fails.

mod entity;
mod href;
mod token;

use std::fmt::Write;

use crate::debug;
use crate::utils::html::{escape_attr, escape_text};

pub use entity::decode;
pub use href::{SAFE_SCHEMES, is_safe_href};
pub use token::{Token, Tokenizer};

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: [&str; 9] = ["a", "b", "strong", "i", "em", "u", "mark", "code", "br"];

/// Look up `name` in the allow-list, returning the canonical static name.
#[inline]
pub fn allowed_tag(name: &str) -> Option<&'static str> {
    ALLOWED_TAGS.iter().copied().find(|tag| *tag == name)
}

/// Filter `html` down to the allow-listed subset.
///
/// - Disallowed tags are removed, their text kept (`<div>hi</div>` → `hi`).
/// - `<a>` survives only with a safe `href`, which is its only attribute.
/// - A close tag that does not match the innermost open tag is dropped.
/// - Tags left open at end of input are closed in reverse order.
pub fn sanitize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut stack: Vec<&'static str> = Vec::new();

    for token in Tokenizer::new(html) {
        match &token {
            Token::Text(text) => out.push_str(&escape_text(text)),
            Token::Open {
                name, self_closing, ..
            } => {
                let Some(tag) = allowed_tag(name) else {
                    continue;
                };
                match tag {
                    "br" => out.push_str("<br>"),
                    "a" => match token.attr("href").map(str::trim) {
                        Some(href) if is_safe_href(href) => {
                            let _ = write!(out, "<a href=\"{}\">", escape_attr(href));
                            stack.push(tag);
                        }
                        href => debug!("sanitize"; "dropped link with unsafe href {:?}", href),
                    },
                    // An empty element carries no text to format
                    _ if *self_closing => {}
                    _ => {
                        let _ = write!(out, "<{tag}>");
                        stack.push(tag);
                    }
                }
            }
            Token::Close { name } => {
                if stack.last().is_some_and(|top| *top == name.as_str()) {
                    stack.pop();
                    let _ = write!(out, "</{name}>");
                }
            }
            Token::Comment => {}
        }
    }

    while let Some(tag) = stack.pop() {
        let _ = write!(out, "</{tag}>");
    }
    out
}
