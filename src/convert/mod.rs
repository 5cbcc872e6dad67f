//! Legacy document → strict tree conversion.
//!
//! ```text
//! convert/
//! ├── inline   # parse_inline / plain_text: sanitized HTML → text runs
//! └── block    # convert_block: per-type structural rules
//! ```
//!
//! Everything here is a pure function of its input. Malformed markup,
//! unknown block types and unsafe links degrade gracefully and are never
//! reported as errors.

mod block;
mod inline;

use serde_json::Value;

use crate::document::{Document, LegacyDocument};

pub use block::convert_block;
pub use inline::{collapse_whitespace, parse_inline, plain_text};

/// Convert a whole document, block by block, in order.
///
/// The result always has at least one block.
pub fn convert_document(doc: &LegacyDocument) -> Document {
    Document::new(doc.blocks.iter().flat_map(convert_block).collect())
}

/// Convert a document given as an arbitrary JSON value.
#[inline]
pub fn convert_value(value: &Value) -> Document {
    convert_document(&LegacyDocument::from_value(value))
}

/// Convert a document given as JSON text.
///
/// Fails only when `json` is not JSON at all.
pub fn convert_json(json: &str) -> serde_json::Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    Ok(convert_value(&value))
}
