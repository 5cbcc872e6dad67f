//! Legacy block document (Editor.js style input).
//!
//! The stored format has no schema: every block carries a `type` tag and a
//! `data` object whose shape is a per-type convention. Parsing never fails.
//! Fields with an unexpected JSON type are read as absent, and block types
//! we don't know keep their raw JSON so nothing is lost downstream.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A legacy document: `{ time?, version?, blocks? }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct LegacyDocument {
    /// Editor save timestamp (milliseconds), carried but unused.
    pub time: Option<f64>,
    /// Editor version string, carried but unused.
    pub version: Option<String>,
    /// Blocks in document order.
    pub blocks: Vec<LegacyBlock>,
}

impl From<Value> for LegacyDocument {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl LegacyDocument {
    /// Read a document from any JSON value.
    ///
    /// Anything that is not an object, or whose `blocks` is not an array,
    /// yields a document without blocks.
    pub fn from_value(value: &Value) -> Self {
        let blocks = value
            .get("blocks")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().map(LegacyBlock::from_value).collect())
            .unwrap_or_default();

        Self {
            time: value.get("time").and_then(Value::as_f64),
            version: value
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_owned),
            blocks,
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether a raw value carries a `blocks` array.
    ///
    /// The core tolerates a missing array; the migration driver does not.
    pub fn has_blocks_array(value: &Value) -> bool {
        value.get("blocks").is_some_and(Value::is_array)
    }
}

/// One legacy block.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyBlock {
    pub id: Option<String>,
    /// The `type` tag as written (`simpleImage` stays `simpleImage`).
    pub kind: String,
    pub data: BlockData,
}

/// Typed payload of a legacy block, one variant per known `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Paragraph {
        text: String,
    },
    Header {
        text: String,
        /// Coerced from a number or numeric string; 1 when absent or zero.
        level: f64,
    },
    List {
        ordered: bool,
        items: Vec<ListEntry>,
    },
    Quote {
        text: String,
        caption: String,
    },
    Checklist {
        items: Vec<ChecklistItem>,
    },
    Delimiter,
    Code {
        code: String,
    },
    Table {
        /// Rows as authored; rows may differ in length.
        rows: Vec<Vec<String>>,
    },
    /// `image` and `simpleImage`.
    Image {
        url: String,
        caption: String,
    },
    Warning {
        title: String,
        message: String,
    },
    /// Any other type. `raw` is the complete original block.
    Unknown {
        kind: String,
        raw: Value,
    },
}

/// A list item; nested-list editors store children under `items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntry {
    pub content: String,
    pub children: Vec<ListEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

impl From<Value> for LegacyBlock {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl LegacyBlock {
    /// Read a block from a raw JSON value.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let id = value.get("id").and_then(Value::as_str).map(str::to_owned);
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let data = value
            .get("data")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let data = match kind {
            "paragraph" => BlockData::Paragraph {
                text: text_field(data, "text"),
            },
            "header" => BlockData::Header {
                text: text_field(data, "text"),
                level: coerce_level(data.get("level")),
            },
            "list" => BlockData::List {
                ordered: data.get("style").and_then(Value::as_str) == Some("ordered"),
                items: list_entries(data.get("items")),
            },
            "quote" => BlockData::Quote {
                text: text_field(data, "text"),
                caption: text_field(data, "caption"),
            },
            "checklist" => BlockData::Checklist {
                items: checklist_items(data.get("items")),
            },
            "delimiter" => BlockData::Delimiter,
            "code" => BlockData::Code {
                code: text_field(data, "code"),
            },
            "table" => BlockData::Table {
                rows: table_rows(data.get("content")),
            },
            "image" | "simpleImage" => BlockData::Image {
                url: image_url(data),
                caption: text_field(data, "caption"),
            },
            "warning" => BlockData::Warning {
                title: text_field(data, "title"),
                message: text_field(data, "message"),
            },
            other => BlockData::Unknown {
                kind: other.to_owned(),
                raw: value.clone(),
            },
        };

        Self {
            id,
            kind: kind.to_owned(),
            data,
        }
    }
}

// =============================================================================
// Lenient field readers
// =============================================================================

/// Read a text-bearing field. Strings pass through, numbers are formatted,
/// everything else is absent.
fn text_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn text_field(data: &Map<String, Value>, key: &str) -> String {
    text_value(data.get(key))
}

/// JavaScript-style truthiness, for flags written by loosely typed editors.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

fn coerce_level(value: Option<&Value>) -> f64 {
    let level = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    level
        .filter(|n| n.is_finite() && *n != 0.0)
        .unwrap_or(1.0)
}

fn list_entries(value: Option<&Value>) -> Vec<ListEntry> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(obj) => ListEntry {
                content: text_value(obj.get("content").or_else(|| obj.get("text"))),
                children: list_entries(obj.get("items")),
            },
            other => ListEntry {
                content: text_value(Some(other)),
                children: Vec::new(),
            },
        })
        .collect()
}

fn checklist_items(value: Option<&Value>) -> Vec<ChecklistItem> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(obj) => ChecklistItem {
                text: text_value(obj.get("text")),
                checked: truthy(obj.get("checked")),
            },
            other => ChecklistItem {
                text: text_value(Some(other)),
                checked: false,
            },
        })
        .collect()
}

fn table_rows(value: Option<&Value>) -> Vec<Vec<String>> {
    let Some(rows) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(|c| text_value(Some(c))).collect())
                .unwrap_or_default()
        })
        .collect()
}

/// `data.url`, falling back to the uploader plugin's `data.file.url`.
fn image_url(data: &Map<String, Value>) -> String {
    data.get("url")
        .and_then(Value::as_str)
        .or_else(|| data.get("file")?.get("url")?.as_str())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_or_malformed_blocks() {
        assert!(LegacyDocument::from_value(&json!({})).blocks.is_empty());
        assert!(LegacyDocument::from_value(&json!({"blocks": "nope"})).blocks.is_empty());
        assert!(LegacyDocument::from_value(&json!(null)).blocks.is_empty());
        assert!(!LegacyDocument::has_blocks_array(&json!({"blocks": {}})));
        assert!(LegacyDocument::has_blocks_array(&json!({"blocks": []})));
    }

    #[test]
    fn test_from_json() {
        let doc = LegacyDocument::from_json(
            r#"{"time": 1700000000000, "version": "2.28.0", "blocks": [
                {"id": "a1", "type": "paragraph", "data": {"text": "Hi"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.time, Some(1_700_000_000_000.0));
        assert_eq!(doc.version.as_deref(), Some("2.28.0"));
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].id.as_deref(), Some("a1"));
        assert_eq!(
            doc.blocks[0].data,
            BlockData::Paragraph {
                text: "Hi".to_string()
            }
        );
    }

    #[test]
    fn test_header_level_coercion() {
        let level = |v: Value| {
            let raw = json!({"type": "header", "data": {"text": "t", "level": v}});
            match LegacyBlock::from_value(&raw).data {
                BlockData::Header { level, .. } => level,
                other => panic!("expected header, got {other:?}"),
            }
        };
        assert_eq!(level(json!(2)), 2.0);
        assert_eq!(level(json!("3")), 3.0);
        assert_eq!(level(json!(0)), 1.0);
        assert_eq!(level(json!("big")), 1.0);
        assert_eq!(level(json!(null)), 1.0);
        assert_eq!(level(json!(6)), 6.0);
    }

    #[test]
    fn test_wrong_field_types_are_absent() {
        let block = LegacyBlock::from_value(&json!({"type": "paragraph", "data": {"text": ["x"]}}));
        assert_eq!(
            block.data,
            BlockData::Paragraph {
                text: String::new()
            }
        );

        let block = LegacyBlock::from_value(&json!({"type": "list", "data": {"items": "a,b"}}));
        assert_eq!(
            block.data,
            BlockData::List {
                ordered: false,
                items: vec![]
            }
        );

        let block = LegacyBlock::from_value(&json!({"type": "quote", "data": 42}));
        assert_eq!(
            block.data,
            BlockData::Quote {
                text: String::new(),
                caption: String::new()
            }
        );
    }

    #[test]
    fn test_nested_list_items() {
        let block = LegacyBlock::from_value(&json!({
            "type": "list",
            "data": {
                "style": "ordered",
                "items": [
                    "plain",
                    {"content": "parent", "items": [{"content": "child", "items": []}]}
                ]
            }
        }));
        let BlockData::List { ordered, items } = block.data else {
            panic!("expected list");
        };
        assert!(ordered);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content, "plain");
        assert_eq!(items[1].content, "parent");
        assert_eq!(items[1].children[0].content, "child");
    }

    #[test]
    fn test_checklist_truthiness() {
        let block = LegacyBlock::from_value(&json!({
            "type": "checklist",
            "data": {"items": [
                {"text": "a", "checked": true},
                {"text": "b", "checked": 0},
                {"text": "c", "checked": "yes"},
                {"text": "d"}
            ]}
        }));
        let BlockData::Checklist { items } = block.data else {
            panic!("expected checklist");
        };
        let checked: Vec<bool> = items.iter().map(|i| i.checked).collect();
        assert_eq!(checked, vec![true, false, true, false]);
    }

    #[test]
    fn test_table_rows_ragged_and_malformed() {
        let block = LegacyBlock::from_value(&json!({
            "type": "table",
            "data": {"content": [["a", "b"], ["c"], "broken", [1, null]]}
        }));
        let BlockData::Table { rows } = block.data else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["c"]);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec!["1".to_string(), String::new()]);
    }

    #[test]
    fn test_image_url_fallback() {
        let block = LegacyBlock::from_value(&json!({
            "type": "image",
            "data": {"file": {"url": "https://cdn.example.com/a.png"}, "caption": "A"}
        }));
        assert_eq!(
            block.data,
            BlockData::Image {
                url: "https://cdn.example.com/a.png".to_string(),
                caption: "A".to_string()
            }
        );

        let block = LegacyBlock::from_value(&json!({
            "type": "simpleImage",
            "data": {"url": "/a.png", "file": {"url": "/b.png"}}
        }));
        assert_eq!(block.kind, "simpleImage");
        assert!(matches!(block.data, BlockData::Image { ref url, .. } if url == "/a.png"));
    }

    #[test]
    fn test_unknown_block_keeps_raw() {
        let raw = json!({"id": "x", "type": "embed", "data": {"url": "https://x.com"}});
        let block = LegacyBlock::from_value(&raw);
        assert_eq!(block.kind, "embed");
        assert_eq!(
            block.data,
            BlockData::Unknown {
                kind: "embed".to_string(),
                raw
            }
        );
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let block = LegacyBlock::from_value(&json!({"data": {"text": "?"}}));
        assert!(matches!(block.data, BlockData::Unknown { ref kind, .. } if kind.is_empty()));
    }
}
