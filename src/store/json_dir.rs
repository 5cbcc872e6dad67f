//! Directory-of-JSON-files store.
//!
//! Each `*.json` file under the directory (recursively) is one record:
//!
//! ```json
//! {
//!   "id": "42",
//!   "slug": "hello-world",
//!   "legacyContent": { "blocks": [ ... ] },
//!   "hasLegacyBlocks": true,
//!   "content": null
//! }
//! ```
//!
//! Writing back only sets `content`, `contentFormat` and
//! `contentSchemaVersion`; every other key keeps its value and position.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use jwalk::WalkDir;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::{ContentStore, ConvertedRecord, Loaded, RecordError, StoreError, StoredRecord};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Store backed by a directory of record files.
#[derive(Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
    pretty: bool,
    /// Record id → file, filled by `load`.
    index: RwLock<FxHashMap<String, PathBuf>>,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: true,
            index: RwLock::new(FxHashMap::default()),
        }
    }

    /// Write records pretty-printed (default) or compact.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `path` relative to the store directory.
    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.dir).unwrap_or(path).to_path_buf()
    }

    /// Report name for a file that could not become a record.
    fn name(&self, path: &Path) -> String {
        self.relative(path).display().to_string()
    }

    /// All record files, sorted for a stable processing order.
    fn record_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let name = e.file_name().to_str().unwrap_or_default();
                !IGNORED_FILES.contains(&name)
            })
            .map(|e| e.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    }

    fn read_object(path: &Path) -> Result<Map<String, Value>, StoreError> {
        let text =
            fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::NotObject(path.to_path_buf())),
            Err(err) => Err(StoreError::Json(path.to_path_buf(), err)),
        }
    }

    fn write_object(&self, path: &Path, map: Map<String, Value>) -> Result<(), StoreError> {
        let value = Value::Object(map);
        let mut text = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .map_err(|err| StoreError::Json(path.to_path_buf(), err))?;
        text.push('\n');

        let write_err = |err: std::io::Error| StoreError::Write(path.to_path_buf(), err);
        let parent = path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(text.as_bytes()).map_err(write_err)?;
        tmp.persist(path).map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

/// Read one record file into a [`StoredRecord`].
fn parse_record(path: &Path, map: &Map<String, Value>) -> StoredRecord {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let string_key = |key: &str| match map.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let non_null = |key: &str| map.get(key).filter(|value| !value.is_null()).cloned();

    let legacy_content = non_null("legacyContent");
    let has_legacy_blocks = match map.get("hasLegacyBlocks") {
        Some(Value::Bool(flag)) => *flag,
        _ => legacy_content
            .as_ref()
            .is_some_and(|legacy| legacy.get("blocks").is_some()),
    };

    StoredRecord {
        id: string_key("id").unwrap_or_else(|| stem.clone()),
        slug: string_key("slug").unwrap_or(stem),
        legacy_content,
        has_legacy_blocks,
        content: non_null("content"),
    }
}

impl ContentStore for JsonDirStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        if !self.dir.is_dir() {
            return Err(StoreError::Missing(self.dir.clone()));
        }

        let mut loaded = Loaded::default();
        let mut index = self.index.write();
        index.clear();

        for path in self.record_files() {
            let record = Self::read_object(&path).map(|map| parse_record(&path, &map));
            match record {
                // The first file to claim an id owns it; later ones are failures
                Ok(record) => match index.get(&record.id) {
                    Some(first) => {
                        let err = StoreError::DuplicateId(record.id, self.relative(first));
                        loaded
                            .failures
                            .push(RecordError::from_error(self.name(&path), &err));
                    }
                    None => {
                        index.insert(record.id.clone(), path);
                        loaded.records.push(record);
                    }
                },
                Err(err) => {
                    loaded
                        .failures
                        .push(RecordError::from_error(self.name(&path), &err));
                }
            }
        }
        Ok(loaded)
    }

    fn persist(&self, record: &ConvertedRecord) -> Result<(), StoreError> {
        let path = self
            .index
            .read()
            .get(&record.id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownId(record.id.clone()))?;

        // Re-read so concurrent edits to other keys survive
        let mut map = Self::read_object(&path)?;
        map.insert("content".into(), record.converted_document.to_value());
        map.insert("contentFormat".into(), Value::from(record.format_tag));
        map.insert(
            "contentSchemaVersion".into(),
            Value::from(record.schema_version),
        );
        self.write_object(&path, map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, value: Value) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_records() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "a.json",
            json!({"id": "1", "slug": "first", "legacyContent": {"blocks": []}}),
        );
        write(
            dir.path(),
            "nested/b.json",
            json!({"id": 2, "slug": "second", "legacyContent": null, "content": {"type": "doc"}}),
        );
        write(
            dir.path(),
            "c.json",
            json!({"legacyContent": {"time": 1}, "hasLegacyBlocks": true}),
        );
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = JsonDirStore::new(dir.path());
        let loaded = store.load().unwrap();
        assert!(loaded.failures.is_empty());
        assert_eq!(loaded.records.len(), 3);

        let first = &loaded.records[0];
        assert_eq!((first.id.as_str(), first.slug.as_str()), ("1", "first"));
        assert!(first.has_legacy_blocks);
        assert!(first.is_pending(false));

        // Sorted by path: c.json comes before nested/b.json
        let flagged = &loaded.records[1];
        assert_eq!((flagged.id.as_str(), flagged.slug.as_str()), ("c", "c"));
        assert!(flagged.has_legacy_blocks);
        assert!(!flagged.has_blocks_array());

        let nested = &loaded.records[2];
        assert_eq!(nested.id, "2");
        assert_eq!(nested.legacy_content, None);
        assert!(!nested.has_legacy_blocks);
        assert!(nested.content.is_some());
    }

    #[test]
    fn test_unreadable_records_are_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        fs::write(dir.path().join("array.json"), "[1, 2]").unwrap();
        write(dir.path(), "ok.json", json!({"id": "1", "slug": "ok"}));

        let loaded = JsonDirStore::new(dir.path()).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        let slugs: Vec<_> = loaded.failures.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, vec!["array.json", "broken.json"]);
        assert!(loaded.failures[0].message.contains("not a JSON object"));
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path().join("absent"));
        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_persist_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "post.json",
            json!({"id": "9", "slug": "post", "title": "T", "legacyContent": {"blocks": []}, "tags": ["a"]}),
        );

        let store = JsonDirStore::new(dir.path());
        store.load().unwrap();
        store
            .persist(&ConvertedRecord::new("9", Document::default()))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "slug",
                "title",
                "legacyContent",
                "tags",
                "content",
                "contentFormat",
                "contentSchemaVersion"
            ]
        );
        assert_eq!(value["content"], Document::default().to_value());
        assert_eq!(value["contentFormat"], "pm");
        assert_eq!(value["contentSchemaVersion"], 1);

        // Converted now, so no longer pending
        let reloaded = store.load().unwrap();
        assert!(!reloaded.records[0].is_pending(false));
    }

    #[test]
    fn test_persist_unknown_id() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirStore::new(dir.path());
        store.load().unwrap();
        let err = store
            .persist(&ConvertedRecord::new("missing", Document::default()))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownId(id) if id == "missing"));
    }

    #[test]
    fn test_duplicate_ids_are_failures() {
        let dir = TempDir::new().unwrap();
        let first = write(dir.path(), "a/post.json", json!({"legacyContent": {"blocks": []}}));
        let second = write(dir.path(), "b/post.json", json!({"legacyContent": {"blocks": []}}));
        write(dir.path(), "c.json", json!({"id": "post", "slug": "other"}));

        let store = JsonDirStore::new(dir.path());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].id, "post");

        let names: Vec<_> = loaded.failures.iter().map(|f| f.slug.clone()).collect();
        assert_eq!(
            names,
            vec![
                Path::new("b/post.json").display().to_string(),
                "c.json".to_string()
            ]
        );
        assert!(loaded.failures[0].message.contains("duplicate id `post`"));

        store
            .persist(&ConvertedRecord::new("post", Document::default()))
            .unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&first).unwrap()).unwrap();
        let untouched: Value = serde_json::from_str(&fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(written["contentFormat"], "pm");
        assert!(untouched.get("content").is_none());
    }

    #[test]
    fn test_compact_output() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "p.json", json!({"id": "1", "slug": "p"}));
        let store = JsonDirStore::new(dir.path()).with_pretty(false);
        store.load().unwrap();
        store
            .persist(&ConvertedRecord::new("1", Document::default()))
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
