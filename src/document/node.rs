//! Strict tree document (ProseMirror/Tiptap JSON).
//!
//! Every node serializes as `{ "type": "<camelCase>", "attrs"?, "content"? }`.
//! Empty `content` is omitted, so an empty paragraph is `{"type":"paragraph"}`.
//! The type names listed in [`BLOCK_TYPES`], [`INLINE_TYPES`] and
//! [`MARK_TYPES`] are the whole surface a renderer has to support.

use serde::{Deserialize, Serialize};

/// Block node type names, as serialized.
pub const BLOCK_TYPES: &[&str] = &[
    "paragraph",
    "heading",
    "bulletList",
    "orderedList",
    "listItem",
    "blockquote",
    "taskList",
    "taskItem",
    "horizontalRule",
    "codeBlock",
    "table",
    "tableRow",
    "tableCell",
    "image",
    "figure",
    "figcaption",
    "callout",
];

/// Inline node type names, as serialized.
pub const INLINE_TYPES: &[&str] = &["text", "hardBreak"];

/// Mark type names, as serialized.
pub const MARK_TYPES: &[&str] = &["bold", "italic", "underline", "highlight", "code", "link"];

/// Root tag, always `"doc"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    #[default]
    Doc,
}

/// Root of a converted document. `content` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: DocKind,
    pub content: Vec<Block>,
}

impl Document {
    /// Wrap converted blocks, inserting an empty paragraph if there are none.
    pub fn new(mut content: Vec<Block>) -> Self {
        if content.is_empty() {
            content.push(Block::empty_paragraph());
        }
        Self {
            kind: DocKind::Doc,
            content,
        }
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> serde_json::Value {
        // Plain enums/strings/bools only: serialization cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// =============================================================================
// Block nodes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    ListItem {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    TaskList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    TaskItem {
        attrs: TaskItemAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    HorizontalRule,
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Table {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    TableRow {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    TableCell {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    Image {
        attrs: ImageAttrs,
    },
    Figure {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    Figcaption {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Callout {
        attrs: CalloutAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
}

impl Block {
    #[inline]
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Self::Paragraph { content }
    }

    #[inline]
    pub fn empty_paragraph() -> Self {
        Self::Paragraph {
            content: Vec::new(),
        }
    }

    /// Serialized type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::BulletList { .. } => "bulletList",
            Self::OrderedList { .. } => "orderedList",
            Self::ListItem { .. } => "listItem",
            Self::Blockquote { .. } => "blockquote",
            Self::TaskList { .. } => "taskList",
            Self::TaskItem { .. } => "taskItem",
            Self::HorizontalRule => "horizontalRule",
            Self::CodeBlock { .. } => "codeBlock",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "tableRow",
            Self::TableCell { .. } => "tableCell",
            Self::Image { .. } => "image",
            Self::Figure { .. } => "figure",
            Self::Figcaption { .. } => "figcaption",
            Self::Callout { .. } => "callout",
        }
    }

    /// Concatenated text of every inline descendant (hard breaks as `\n`).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Paragraph { content }
            | Self::Heading { content, .. }
            | Self::CodeBlock { content, .. }
            | Self::Figcaption { content } => {
                for inline in content {
                    match inline {
                        Inline::Text { text, .. } => out.push_str(text),
                        Inline::HardBreak => out.push('\n'),
                    }
                }
            }
            Self::BulletList { content }
            | Self::OrderedList { content }
            | Self::ListItem { content }
            | Self::Blockquote { content }
            | Self::TaskList { content }
            | Self::TaskItem { content, .. }
            | Self::Table { content }
            | Self::TableRow { content }
            | Self::TableCell { content }
            | Self::Figure { content }
            | Self::Callout { content, .. } => {
                for block in content {
                    block.collect_text(out);
                }
            }
            Self::HorizontalRule | Self::Image { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutAttrs {
    #[serde(rename = "type")]
    pub kind: CalloutKind,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Warning,
}

// =============================================================================
// Inline nodes and marks
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    /// A run of text; never empty.
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
}

impl Inline {
    /// Unmarked text run.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Text run carrying `marks` (outer to inner).
    #[inline]
    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self::Text {
            text: text.into(),
            marks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Highlight,
    Code,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

/// Mark type without its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Highlight,
    Code,
    Link,
}

impl Mark {
    #[inline]
    pub fn link(href: impl Into<String>) -> Self {
        Self::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }

    #[inline]
    pub const fn kind(&self) -> MarkKind {
        match self {
            Self::Bold => MarkKind::Bold,
            Self::Italic => MarkKind::Italic,
            Self::Underline => MarkKind::Underline,
            Self::Highlight => MarkKind::Highlight,
            Self::Code => MarkKind::Code,
            Self::Link { .. } => MarkKind::Link,
        }
    }
}
