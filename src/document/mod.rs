//! Document models.
//!
//! ```text
//! document/
//! ├── legacy   # LegacyDocument: ordered, loosely typed blocks (input)
//! └── node     # Document: strictly nested block/inline tree (output)
//! ```
//!
//! Both sides are plain value trees: no sharing between subtrees, no
//! back-references, nothing mutated after construction.

mod legacy;
mod node;

pub use legacy::{BlockData, ChecklistItem, LegacyBlock, LegacyDocument, ListEntry};
pub use node::{
    BLOCK_TYPES, Block, CalloutAttrs, CalloutKind, CodeBlockAttrs, DocKind, Document,
    HeadingAttrs, INLINE_TYPES, ImageAttrs, Inline, LinkAttrs, MARK_TYPES, Mark, MarkKind,
    TaskItemAttrs,
};
