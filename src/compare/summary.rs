//! Flat change summaries of difference trees

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::difference::{Comparable, Difference, MapDifference, ScalarDiff};

/// A node of a difference tree that can report its changes
pub trait DiffNode {
    /// Append every change under this node, with `path` as the node's location
    fn collect_into(&self, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>);

    /// True when nothing under this node changed
    fn is_unchanged(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTag {
    Added,
    Removed,
    Changed,
}

/// One change at a dotted path such as `classes.login.attributes.status.type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEntry {
    pub path: String,
    pub change: ChangeTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

impl ChangeEntry {
    fn new<T: Serialize>(
        path: &[String],
        change: ChangeTag,
        before: Option<&T>,
        after: Option<&T>,
    ) -> Self {
        Self {
            path: path.join("."),
            change,
            before: before.and_then(|value| serde_json::to_value(value).ok()),
            after: after.and_then(|value| serde_json::to_value(value).ok()),
        }
    }
}

fn short(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::Object(_)) => "{...}".to_string(),
        Some(value) => value.to_string(),
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change {
            ChangeTag::Added => write!(f, "+ {}", self.path),
            ChangeTag::Removed => write!(f, "- {}", self.path),
            ChangeTag::Changed => write!(
                f,
                "~ {}: {} -> {}",
                self.path,
                short(self.before.as_ref()),
                short(self.after.as_ref())
            ),
        }
    }
}

/// Every change under `node`, in field declaration and key order
pub fn collect_changes<N: DiffNode + ?Sized>(node: &N) -> Vec<ChangeEntry> {
    let mut path = Vec::new();
    let mut out = Vec::new();
    node.collect_into(&mut path, &mut out);
    out
}

/// One line per change
pub fn render_changes(changes: &[ChangeEntry]) -> String {
    changes
        .iter()
        .map(|change| format!("{}\n", change))
        .collect()
}

impl<T: Comparable> DiffNode for Difference<T> {
    fn collect_into(&self, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>) {
        match self {
            Difference::Unchanged => {}
            Difference::Added { after } => {
                out.push(ChangeEntry::new(path, ChangeTag::Added, None, Some(after)))
            }
            Difference::Removed { before } => {
                out.push(ChangeEntry::new(path, ChangeTag::Removed, Some(before), None))
            }
            Difference::Changed { before, after } => out.push(ChangeEntry::new(
                path,
                ChangeTag::Changed,
                Some(before),
                Some(after),
            )),
            Difference::Record(diff) => diff.collect_into(path, out),
        }
    }

    fn is_unchanged(&self) -> bool {
        match self {
            Difference::Unchanged => true,
            Difference::Record(diff) => diff.is_unchanged(),
            _ => false,
        }
    }
}

impl<T: Comparable> DiffNode for BTreeMap<String, Difference<T>> {
    fn collect_into(&self, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>) {
        for (key, diff) in self {
            path.push(key.clone());
            diff.collect_into(path, out);
            path.pop();
        }
    }

    fn is_unchanged(&self) -> bool {
        self.values().all(DiffNode::is_unchanged)
    }
}

impl<T: Comparable> DiffNode for MapDifference<T> {
    fn collect_into(&self, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>) {
        if let MapDifference::Entries(entries) = self {
            entries.collect_into(path, out);
        }
    }

    fn is_unchanged(&self) -> bool {
        match self {
            MapDifference::Unchanged => true,
            MapDifference::Entries(entries) => entries.is_unchanged(),
        }
    }
}

impl DiffNode for ScalarDiff {
    fn collect_into(&self, _path: &mut Vec<String>, _out: &mut Vec<ChangeEntry>) {
        match *self {}
    }

    fn is_unchanged(&self) -> bool {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_schemas;
    use crate::schema::{OcsfAttr, OcsfEvent, OcsfSchema};

    fn schema_with_status(r#type: &str) -> OcsfSchema {
        let mut schema = OcsfSchema::new("1.0.0");
        let mut login = OcsfEvent::new("login", "Login");
        login.attributes.insert(
            "status".into(),
            OcsfAttr {
                caption: Some("Status".into()),
                r#type: Some(r#type.into()),
                ..Default::default()
            },
        );
        schema.classes.insert("login".into(), login);
        schema
    }

    #[test]
    fn test_identical_schemas_have_no_changes() {
        let schema = schema_with_status("int_t");
        let diff = compare_schemas(&schema, &schema);
        assert!(diff.is_unchanged());
        assert!(collect_changes(&diff).is_empty());
    }

    #[test]
    fn test_changed_leaf_path() {
        let diff = compare_schemas(&schema_with_status("int_t"), &schema_with_status("string_t"));
        let changes = collect_changes(&diff);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "classes.login.attributes.status.type");
        assert_eq!(changes[0].change, ChangeTag::Changed);
        assert_eq!(
            changes[0].to_string(),
            "~ classes.login.attributes.status.type: \"int_t\" -> \"string_t\""
        );
    }

    #[test]
    fn test_removed_record_is_not_descended() {
        let old = schema_with_status("int_t");
        let new = OcsfSchema::new("1.0.0");

        let changes = collect_changes(&compare_schemas(&old, &new));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "classes.login");
        assert_eq!(changes[0].change, ChangeTag::Removed);
        assert!(changes[0].before.is_some());
        assert_eq!(changes[0].to_string(), "- classes.login");
    }

    #[test]
    fn test_render_changes_in_tree_order() {
        let mut old = schema_with_status("int_t");
        old.version = "1.0.0".into();
        let mut new = schema_with_status("string_t");
        new.version = "1.1.0".into();
        new.classes
            .insert("logout".into(), OcsfEvent::new("logout", "Logout"));

        let rendered = render_changes(&collect_changes(&compare_schemas(&old, &new)));
        assert_eq!(
            rendered,
            "~ version: \"1.0.0\" -> \"1.1.0\"\n\
             ~ classes.login.attributes.status.type: \"int_t\" -> \"string_t\"\n\
             + classes.logout\n"
        );
    }
}
