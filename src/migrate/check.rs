//! Structural check for converted trees.
//!
//! Works on raw JSON so it can vet both freshly converted documents and
//! whatever is already sitting in the store.

use std::fmt;

use serde_json::{Map, Value};

use crate::document::{BLOCK_TYPES, INLINE_TYPES, MARK_TYPES};

/// Block types whose children are inline nodes.
const TEXTBLOCK_TYPES: [&str; 4] = ["paragraph", "heading", "codeBlock", "figcaption"];

/// One structural problem, located by a JSON path like `content[2].content[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a converted document, returning every problem found.
///
/// - root `type` is `"doc"` and `content` is a non-empty array
/// - every node has a known `type` for its position (block or inline)
/// - text nodes have non-empty text, marks have known types, links an href
/// - heading levels are within 1..=3
pub fn check_document(value: &Value) -> Vec<Issue> {
    let mut checker = Checker::default();
    let Some(root) = value.as_object() else {
        checker.issue("$", "document is not an object");
        return checker.issues;
    };

    if root.get("type").and_then(Value::as_str) != Some("doc") {
        checker.issue("$", "root type is not `doc`");
    }
    match root.get("content").and_then(Value::as_array) {
        Some(content) if !content.is_empty() => {
            for (i, node) in content.iter().enumerate() {
                checker.block(&format!("content[{i}]"), node);
            }
        }
        Some(_) => checker.issue("content", "document has no blocks"),
        None => checker.issue("content", "content is not an array"),
    }
    checker.issues
}

#[derive(Default)]
struct Checker {
    issues: Vec<Issue>,
}

impl Checker {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.to_owned(),
            message: message.into(),
        });
    }

    /// Node object and its `type`, recording an issue if either is missing.
    fn node<'v>(&mut self, path: &str, node: &'v Value) -> Option<(&'v Map<String, Value>, &'v str)> {
        let Some(obj) = node.as_object() else {
            self.issue(path, "node is not an object");
            return None;
        };
        let Some(kind) = obj.get("type").and_then(Value::as_str) else {
            self.issue(path, "node has no type");
            return None;
        };
        Some((obj, kind))
    }

    /// Children under `content`, which may be absent but not malformed.
    fn children<'v>(&mut self, path: &str, obj: &'v Map<String, Value>) -> &'v [Value] {
        match obj.get("content") {
            None => &[],
            Some(Value::Array(children)) => children,
            Some(_) => {
                self.issue(path, "content is not an array");
                &[]
            }
        }
    }

    fn block(&mut self, path: &str, node: &Value) {
        let Some((obj, kind)) = self.node(path, node) else {
            return;
        };
        if !BLOCK_TYPES.contains(&kind) {
            self.issue(path, format!("unknown block type `{kind}`"));
            return;
        }

        if kind == "heading" {
            let level = obj
                .get("attrs")
                .and_then(|attrs| attrs.get("level"))
                .and_then(Value::as_u64);
            if !level.is_some_and(|level| (1..=3).contains(&level)) {
                self.issue(path, "heading level is not within 1..=3");
            }
        }

        let inline = TEXTBLOCK_TYPES.contains(&kind);
        for (i, child) in self.children(path, obj).iter().enumerate() {
            let child_path = format!("{path}.content[{i}]");
            if inline {
                self.inline(&child_path, child);
            } else {
                self.block(&child_path, child);
            }
        }
    }

    fn inline(&mut self, path: &str, node: &Value) {
        let Some((obj, kind)) = self.node(path, node) else {
            return;
        };
        if !INLINE_TYPES.contains(&kind) {
            self.issue(path, format!("unknown inline type `{kind}`"));
            return;
        }
        if kind != "text" {
            return;
        }

        match obj.get("text").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => {}
            _ => self.issue(path, "text node has no text"),
        }
        match obj.get("marks") {
            None => {}
            Some(Value::Array(marks)) => {
                for (i, mark) in marks.iter().enumerate() {
                    self.mark(&format!("{path}.marks[{i}]"), mark);
                }
            }
            Some(_) => self.issue(path, "marks is not an array"),
        }
    }

    fn mark(&mut self, path: &str, mark: &Value) {
        let Some((obj, kind)) = self.node(path, mark) else {
            return;
        };
        if !MARK_TYPES.contains(&kind) {
            self.issue(path, format!("unknown mark type `{kind}`"));
        } else if kind == "link"
            && obj
                .get("attrs")
                .and_then(|attrs| attrs.get("href"))
                .and_then(Value::as_str)
                .is_none_or(str::is_empty)
        {
            self.issue(path, "link has no href");
        }
    }
}
