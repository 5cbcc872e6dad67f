//! HTML-ish tokenizer.
//!
//! A small finite-state machine over the input bytes:
//!
//! ```text
//! Text ──'<' + letter──► TagName ──ws──► Attrs ──'='──► AttrValue
//!   ▲                       │              │  ▲              │
//!   └──────────'>'──────────┴──────────────┘  └──────────────┘
//! ```
//!
//! Each tag is scanned exactly once. Text and attribute values are entity
//! decoded on the way out, and decoded output is never fed back into the
//! machine. A `<` that does not start a complete tag is plain text.

use std::borrow::Cow;

use super::entity::decode;

/// One lexical unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Entity-decoded text.
    Text(Cow<'a, str>),
    /// Start tag. `name` and attribute names are lowercased.
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    /// End tag, lowercased.
    Close { name: String },
    /// `<!-- ... -->`, `<!DOCTYPE ...>` or `<? ... ?>`.
    Comment,
}

impl Token<'_> {
    /// Value of attribute `key` on a start tag (first occurrence wins).
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Self::Open { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TagName,
    Attrs,
    AttrValue,
}

/// Iterator over the tokens of `src`.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Text from `start` up to the next `<` after it (or end of input).
    fn text_from(&mut self, start: usize) -> Token<'a> {
        let end = self.src[start + 1..]
            .find('<')
            .map_or(self.src.len(), |idx| start + 1 + idx);
        self.pos = end;
        Token::Text(decode(&self.src[start..end]))
    }

    /// Try to scan a tag starting at `start` (which holds `<`).
    ///
    /// Returns the token and the index just past its `>`, or `None` when the
    /// markup is not a complete tag.
    fn scan_tag(&self, start: usize) -> Option<(Token<'a>, usize)> {
        let src = self.src;
        let bytes = src.as_bytes();
        let mut i = start + 1;

        let closing = bytes.get(i) == Some(&b'/');
        if closing {
            i += 1;
        }
        match bytes.get(i) {
            Some(b) if b.is_ascii_alphabetic() => {}
            Some(b'!' | b'?') if !closing => {
                let end = if src[i..].starts_with("!--") {
                    src[i + 3..].find("-->").map(|idx| i + 3 + idx + 3)?
                } else {
                    src[i..].find('>').map(|idx| i + idx + 1)?
                };
                return Some((Token::Comment, end));
            }
            _ => return None,
        }

        let name_start = i;
        let mut name = "";
        let mut attr_name = "";
        let mut attrs = Vec::new();
        let mut self_closing = false;
        let mut state = State::TagName;

        while i < bytes.len() {
            let b = bytes[i];
            match state {
                State::TagName => {
                    if b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_') {
                        i += 1;
                    } else {
                        name = &src[name_start..i];
                        state = State::Attrs;
                    }
                }
                State::Attrs => match b {
                    b'>' => {
                        let name = name.to_ascii_lowercase();
                        let token = if closing {
                            Token::Close { name }
                        } else {
                            Token::Open {
                                name,
                                attrs,
                                self_closing,
                            }
                        };
                        return Some((token, i + 1));
                    }
                    b'/' => {
                        self_closing = true;
                        i += 1;
                    }
                    b if b.is_ascii_whitespace() => i += 1,
                    _ => {
                        self_closing = false;
                        let attr_start = i;
                        while i < bytes.len()
                            && !bytes[i].is_ascii_whitespace()
                            && !matches!(bytes[i], b'=' | b'>' | b'/')
                        {
                            i += 1;
                        }
                        attr_name = &src[attr_start..i];
                        i = skip_whitespace(bytes, i);
                        if bytes.get(i) == Some(&b'=') {
                            i = skip_whitespace(bytes, i + 1);
                            state = State::AttrValue;
                        } else {
                            attrs.push((attr_name.to_ascii_lowercase(), String::new()));
                        }
                    }
                },
                State::AttrValue => {
                    let value = match b {
                        b'"' | b'\'' => {
                            let end = src[i + 1..].find(b as char)?;
                            let value = &src[i + 1..i + 1 + end];
                            i += end + 2;
                            value
                        }
                        _ => {
                            let value_start = i;
                            while i < bytes.len()
                                && !bytes[i].is_ascii_whitespace()
                                && bytes[i] != b'>'
                            {
                                i += 1;
                            }
                            &src[value_start..i]
                        }
                    };
                    attrs.push((attr_name.to_ascii_lowercase(), decode(value).into_owned()));
                    state = State::Attrs;
                }
            }
        }
        None
    }
}

#[inline]
fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        if start >= self.src.len() {
            return None;
        }
        if self.src.as_bytes()[start] != b'<' {
            return Some(match self.src[start..].find('<') {
                Some(idx) => {
                    self.pos = start + idx;
                    Token::Text(decode(&self.src[start..start + idx]))
                }
                None => {
                    self.pos = self.src.len();
                    Token::Text(decode(&self.src[start..]))
                }
            });
        }
        match self.scan_tag(start) {
            Some((token, end)) => {
                self.pos = end;
                Some(token)
            }
            None => Some(self.text_from(start)),
        }
    }
}
