//! Folio - convert legacy block documents into strict ProseMirror-style trees.
//!
//! The conversion core is pure and synchronous:
//!
//! ```text
//! LegacyDocument ──convert_block──► sanitize ──► parse_inline ──► Document
//! ```
//!
//! Around it sit a storage seam ([`store::ContentStore`]) and a parallel
//! batch driver ([`migrate::migrate`]) used by the `folio` binary.
//!
//! ```
//! use folio::convert::convert_json;
//!
//! let doc = convert_json(r#"{"blocks":[{"type":"paragraph","data":{"text":"Hi <b>there</b>"}}]}"#)?;
//! assert_eq!(doc.content.len(), 1);
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod logger;

pub mod convert;
pub mod core;
pub mod document;
pub mod migrate;
pub mod sanitize;
pub mod store;
pub mod utils;
