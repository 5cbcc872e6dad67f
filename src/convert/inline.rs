//! Inline formatter: sanitized HTML → flat list of text runs and hard breaks.

use crate::document::{Inline, Mark, MarkKind};
use crate::sanitize::{Token, Tokenizer, is_safe_href, sanitize};

/// Convert inline HTML into text/hardBreak nodes.
///
/// Formatting is tracked on a mark stack; every text run carries a copy of
/// the stack as it was when the run was flushed. Whitespace is collapsed
/// and trimmed per run, and empty runs are never emitted.
pub fn parse_inline(html: &str) -> Vec<Inline> {
    let clean = sanitize(html);
    if clean.trim().is_empty() {
        return Vec::new();
    }

    let mut builder = InlineBuilder::default();
    for token in Tokenizer::new(&clean) {
        match &token {
            Token::Text(text) => builder.buffer.push_str(text),
            Token::Open { name, .. } if name == "br" => {
                builder.flush();
                builder.nodes.push(Inline::HardBreak);
            }
            Token::Open { name, .. } => {
                if let Some(mark) = open_mark(name, &token) {
                    builder.flush();
                    builder.marks.push(mark);
                }
            }
            Token::Close { name } => {
                if let Some(kind) = mark_kind(name) {
                    builder.flush();
                    builder.close(kind);
                }
            }
            Token::Comment => {}
        }
    }
    builder.finish()
}

/// Text content of inline HTML with all markup removed.
///
/// `<br>` counts as whitespace. Used for alt text, callout titles and
/// caption lines that are rendered without marks.
pub fn plain_text(html: &str) -> String {
    let clean = sanitize(html);
    let mut text = String::with_capacity(clean.len());
    for token in Tokenizer::new(&clean) {
        match token {
            Token::Text(run) => text.push_str(&run),
            Token::Open { name, .. } if name == "br" => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mark type for a formatting tag name.
fn mark_kind(name: &str) -> Option<MarkKind> {
    Some(match name {
        "b" | "strong" => MarkKind::Bold,
        "i" | "em" => MarkKind::Italic,
        "u" => MarkKind::Underline,
        "mark" => MarkKind::Highlight,
        "code" => MarkKind::Code,
        "a" => MarkKind::Link,
        _ => return None,
    })
}

/// Mark pushed by an open tag. Links without a safe href push nothing.
fn open_mark(name: &str, token: &Token<'_>) -> Option<Mark> {
    Some(match mark_kind(name)? {
        MarkKind::Bold => Mark::Bold,
        MarkKind::Italic => Mark::Italic,
        MarkKind::Underline => Mark::Underline,
        MarkKind::Highlight => Mark::Highlight,
        MarkKind::Code => Mark::Code,
        MarkKind::Link => {
            let href = token.attr("href").map(str::trim)?;
            if !is_safe_href(href) {
                return None;
            }
            Mark::link(href)
        }
    })
}

#[derive(Default)]
struct InlineBuilder {
    nodes: Vec<Inline>,
    marks: Vec<Mark>,
    buffer: String,
}

impl InlineBuilder {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = collapse_whitespace(&self.buffer);
        self.buffer.clear();
        if !text.is_empty() {
            self.nodes.push(Inline::marked(text, self.marks.clone()));
        }
    }

    /// Remove the innermost open mark of `kind`, wherever it sits.
    fn close(&mut self, kind: MarkKind) {
        if let Some(idx) = self.marks.iter().rposition(|mark| mark.kind() == kind) {
            self.marks.remove(idx);
        }
    }

    fn finish(mut self) -> Vec<Inline> {
        self.flush();
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(parse_inline("").is_empty());
        assert!(parse_inline("   \n\t").is_empty());
        assert!(parse_inline("<div> </div>").is_empty());
        assert!(parse_inline("<b></b>").is_empty());
    }

    #[test]
    fn test_whitespace_normalization() {
        assert_eq!(parse_inline("a&nbsp;b"), vec![text("a b")]);
        assert_eq!(parse_inline("  multiple   spaces  "), vec![text("multiple spaces")]);
        assert_eq!(parse_inline("line\n\n  two"), vec![text("line two")]);
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(
            parse_inline("a<br>b"),
            vec![text("a"), Inline::HardBreak, text("b")]
        );
        assert_eq!(
            parse_inline("<br/>x<BR>"),
            vec![Inline::HardBreak, text("x"), Inline::HardBreak]
        );
    }

    #[test]
    fn test_hard_break_ignores_marks() {
        assert_eq!(
            parse_inline("<b>a<br>b</b>"),
            vec![
                Inline::marked("a", vec![Mark::Bold]),
                Inline::HardBreak,
                Inline::marked("b", vec![Mark::Bold]),
            ]
        );
    }

    #[test]
    fn test_mark_nesting() {
        assert_eq!(
            parse_inline("<b><i>bi</i></b>"),
            vec![Inline::marked("bi", vec![Mark::Bold, Mark::Italic])]
        );
        assert_eq!(
            parse_inline("x <strong>y <em>z</em></strong> w"),
            vec![
                text("x"),
                Inline::marked("y", vec![Mark::Bold]),
                Inline::marked("z", vec![Mark::Bold, Mark::Italic]),
                text("w"),
            ]
        );
    }

    #[test]
    fn test_all_marks() {
        let nodes = parse_inline(
            r#"<u>u</u><mark>m</mark><code>c</code><a href="tel:+100">t</a>"#,
        );
        assert_eq!(
            nodes,
            vec![
                Inline::marked("u", vec![Mark::Underline]),
                Inline::marked("m", vec![Mark::Highlight]),
                Inline::marked("c", vec![Mark::Code]),
                Inline::marked("t", vec![Mark::link("tel:+100")]),
            ]
        );
    }

    #[test]
    fn test_link_marks() {
        assert_eq!(
            parse_inline(r#"<a href="https://example.com/?a=1&amp;b=2">go</a>"#),
            vec![Inline::marked(
                "go",
                vec![Mark::link("https://example.com/?a=1&b=2")]
            )]
        );
        assert_eq!(
            parse_inline(r#"<a href="javascript:alert(1)">x</a>"#),
            vec![text("x")]
        );
    }

    #[test]
    fn test_close_removes_last_occurrence() {
        // Sanitizer repairs nesting, so feed overlapping marks through
        // the builder directly.
        let mut builder = InlineBuilder::default();
        builder.marks = vec![Mark::Bold, Mark::Italic, Mark::Bold];
        builder.close(MarkKind::Bold);
        assert_eq!(builder.marks, vec![Mark::Bold, Mark::Italic]);
        builder.close(MarkKind::Bold);
        assert_eq!(builder.marks, vec![Mark::Italic]);
        builder.close(MarkKind::Code);
        assert_eq!(builder.marks, vec![Mark::Italic]);
    }

    #[test]
    fn test_encoded_tags_are_text() {
        assert_eq!(
            parse_inline("&lt;script&gt;alert(1)&lt;/script&gt;"),
            vec![text("<script>alert(1)</script>")]
        );
        assert_eq!(parse_inline("a &amp; b"), vec![text("a & b")]);
    }

    #[test]
    fn test_disallowed_wrappers_keep_text() {
        assert_eq!(
            parse_inline("<span class=\"x\">hi <b>there</b></span>"),
            vec![text("hi"), Inline::marked("there", vec![Mark::Bold])]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<b>Bold</b> and <i>it</i>"), "Bold and it");
        assert_eq!(plain_text("one<br>two"), "one two");
        assert_eq!(plain_text("  a&nbsp;&amp;&nbsp;b  "), "a & b");
        assert_eq!(plain_text(r#"<a href="javascript:x">x</a>"#), "x");
        assert_eq!(plain_text(""), "");
    }
}
