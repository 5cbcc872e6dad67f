//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`ContentStore`](super::ContentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store directory `{0}` not found")]
    Missing(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` is not a JSON object")]
    NotObject(PathBuf),

    #[error("duplicate id `{0}` also used by `{1}`")]
    DuplicateId(String, PathBuf),

    #[error("no record with id `{0}` was loaded")]
    UnknownId(String),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// A record that could not be processed, kept for the batch report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// Slug when known, otherwise the record id or file path.
    pub slug: String,
    pub message: String,
}

impl RecordError {
    pub fn new(slug: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            message: message.into(),
        }
    }

    /// Build from an error, flattening its source chain into the message.
    pub fn from_error(slug: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new(slug, message)
    }
}
