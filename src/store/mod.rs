//! Record storage seam.
//!
//! ```text
//! store/
//! ├── error      # StoreError, RecordError
//! └── json_dir   # JsonDirStore: one JSON file per record
//! ```
//!
//! The converter never touches storage. The migration driver reads
//! [`StoredRecord`]s through a [`ContentStore`], converts the pending ones
//! and hands [`ConvertedRecord`]s back for writing.

mod error;
mod json_dir;

use serde_json::Value;

use crate::document::{Document, LegacyDocument};

pub use error::{RecordError, StoreError};
pub use json_dir::JsonDirStore;

/// Format tag written next to converted content.
pub const FORMAT_TAG: &str = "pm";

/// Schema version written next to converted content.
pub const SCHEMA_VERSION: u32 = 1;

/// A stored article as seen by the migration driver.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub slug: String,
    /// Legacy block document, if the record has one.
    pub legacy_content: Option<Value>,
    pub has_legacy_blocks: bool,
    /// Already converted tree, if any.
    pub content: Option<Value>,
}

impl StoredRecord {
    /// Whether the record still needs converting.
    ///
    /// With `force`, records that already carry converted content are
    /// converted again.
    #[inline]
    pub fn is_pending(&self, force: bool) -> bool {
        self.has_legacy_blocks && (force || self.content.is_none())
    }

    /// Whether the legacy content has a `blocks` array to convert.
    pub fn has_blocks_array(&self) -> bool {
        self.legacy_content
            .as_ref()
            .is_some_and(LegacyDocument::has_blocks_array)
    }
}

/// Result of converting one record, ready to write back.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecord {
    pub id: String,
    pub converted_document: Document,
    pub format_tag: &'static str,
    pub schema_version: u32,
}

impl ConvertedRecord {
    pub fn new(id: impl Into<String>, converted_document: Document) -> Self {
        Self {
            id: id.into(),
            converted_document,
            format_tag: FORMAT_TAG,
            schema_version: SCHEMA_VERSION,
        }
    }
}

/// Records read from a store, plus the ones that could not be read.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<StoredRecord>,
    pub failures: Vec<RecordError>,
}

/// Storage backend for the migration driver.
///
/// `persist` is called from worker threads.
pub trait ContentStore: Sync {
    /// Read every record.
    fn load(&self) -> Result<Loaded, StoreError>;

    /// Write converted content back to the record with the same id.
    fn persist(&self, record: &ConvertedRecord) -> Result<(), StoreError>;
}
