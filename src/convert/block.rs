//! Block dispatcher: one legacy block → one or more tree blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::debug;
use crate::document::{
    Block, BlockData, CalloutAttrs, CalloutKind, ChecklistItem, CodeBlockAttrs, HeadingAttrs,
    ImageAttrs, Inline, LegacyBlock, ListEntry, Mark, TaskItemAttrs,
};
use crate::sanitize::sanitize;

use super::inline::{parse_inline, plain_text};

/// Two or more consecutive `<br>` end a paragraph. Matched on sanitized
/// markup, where every line break is a bare lowercase `<br>`.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br>\s*){2,}").expect("valid regex"));

/// Heading levels the tree supports.
const MAX_HEADING_LEVEL: f64 = 3.0;

/// Convert one legacy block.
///
/// Every block yields at least one node. Unknown types become a JSON code
/// block holding the original block, so nothing is silently dropped.
pub fn convert_block(block: &LegacyBlock) -> Vec<Block> {
    let node = match &block.data {
        BlockData::Paragraph { text } => Block::paragraph(parse_inline(text)),
        BlockData::Header { text, level } => Block::Heading {
            attrs: HeadingAttrs {
                level: level.clamp(1.0, MAX_HEADING_LEVEL) as u8,
            },
            content: parse_inline(text),
        },
        BlockData::List { ordered, items } => list(*ordered, items),
        BlockData::Quote { text, caption } => {
            let mut content = paragraphs(text);
            let caption = plain_text(caption);
            if !caption.is_empty() {
                content.push(Block::paragraph(vec![Inline::marked(
                    format!("— {caption}"),
                    vec![Mark::Italic],
                )]));
            }
            Block::Blockquote { content }
        }
        BlockData::Checklist { items } => Block::TaskList {
            content: items.iter().map(task_item).collect(),
        },
        BlockData::Delimiter => Block::HorizontalRule,
        BlockData::Code { code } => Block::CodeBlock {
            attrs: None,
            content: raw_text(code.clone()),
        },
        BlockData::Table { rows } => Block::Table {
            content: rows.iter().map(|row| table_row(row)).collect(),
        },
        BlockData::Image { url, caption } => figure(url, caption),
        BlockData::Warning { title, message } => Block::Callout {
            attrs: CalloutAttrs {
                kind: CalloutKind::Warning,
                title: plain_text(title),
            },
            content: paragraphs(message),
        },
        BlockData::Unknown { kind, raw } => {
            debug!(
                "convert";
                "unknown block type `{}` (id {}), keeping it as JSON",
                kind,
                block.id.as_deref().unwrap_or("-")
            );
            Block::CodeBlock {
                attrs: Some(CodeBlockAttrs {
                    language: "json".to_owned(),
                }),
                content: raw_text(serde_json::to_string_pretty(raw).unwrap_or_default()),
            }
        }
    };
    vec![node]
}

/// Split on paragraph breaks and format each part.
///
/// The split runs after sanitizing so breaks inside comments or attribute
/// values are never seen. Blank parts are skipped; with nothing left the
/// result is one empty paragraph.
fn paragraphs(html: &str) -> Vec<Block> {
    let clean = sanitize(html);
    let mut content: Vec<Block> = PARAGRAPH_BREAK
        .split(&clean)
        .map(parse_inline)
        .filter(|inlines| !inlines.is_empty())
        .map(Block::paragraph)
        .collect();
    if content.is_empty() {
        content.push(Block::empty_paragraph());
    }
    content
}

/// A single unformatted text node, or nothing for empty text.
fn raw_text(text: String) -> Vec<Inline> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Inline::text(text)]
    }
}

fn list(ordered: bool, items: &[ListEntry]) -> Block {
    let content = items.iter().map(|item| list_item(ordered, item)).collect();
    if ordered {
        Block::OrderedList { content }
    } else {
        Block::BulletList { content }
    }
}

fn list_item(ordered: bool, item: &ListEntry) -> Block {
    let mut content = vec![Block::paragraph(parse_inline(&item.content))];
    if !item.children.is_empty() {
        content.push(list(ordered, &item.children));
    }
    Block::ListItem { content }
}

fn task_item(item: &ChecklistItem) -> Block {
    Block::TaskItem {
        attrs: TaskItemAttrs {
            checked: item.checked,
        },
        content: vec![Block::paragraph(parse_inline(&item.text))],
    }
}

fn table_row(row: &[String]) -> Block {
    Block::TableRow {
        content: row
            .iter()
            .map(|cell| Block::TableCell {
                content: vec![Block::paragraph(parse_inline(cell))],
            })
            .collect(),
    }
}

fn figure(url: &str, caption: &str) -> Block {
    let mut content = vec![Block::Image {
        attrs: ImageAttrs {
            src: url.to_owned(),
            alt: plain_text(caption),
        },
    }];
    let caption = parse_inline(caption);
    if !caption.is_empty() {
        content.push(Block::Figcaption { content: caption });
    }
    Block::Figure { content }
}
