//! Path tracking for nested failures.
//!
//! Composite schemas report where a child failed by prepending their own
//! [`PathItem`] to every issue the child produced. Paths are stored root
//! first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::issue::Issue;

/// Container kind of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathItemType {
    /// Object entry or record entry
    Object,
    /// Array item or tuple slot
    Array,
    /// Map entry
    Map,
    /// Set member
    Set,
    /// Anything else
    Unknown,
}

/// Whether the segment points at an entry's key or its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathOrigin {
    /// The key itself failed
    Key,
    /// The value stored under the key failed
    Value,
}

/// One hop in an issue's location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    /// Container kind
    #[serde(rename = "type")]
    pub item_type: PathItemType,

    /// Key or value origin
    pub origin: PathOrigin,

    /// The whole container input
    pub input: Value,

    /// Key or index, `None` for keyless containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,

    /// Value at this position, `None` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PathItem {
    /// Segment for the value of an object entry
    #[must_use]
    pub fn object(input: Value, key: impl Into<Value>, value: Option<Value>) -> Self {
        Self {
            item_type: PathItemType::Object,
            origin: PathOrigin::Value,
            input,
            key: Some(key.into()),
            value,
        }
    }

    /// Segment for the key of an object entry
    #[must_use]
    pub fn object_key(input: Value, key: impl Into<Value>, value: Option<Value>) -> Self {
        Self {
            origin: PathOrigin::Key,
            ..Self::object(input, key, value)
        }
    }

    /// Segment for an array item
    #[must_use]
    pub fn array(input: Value, index: usize, value: Option<Value>) -> Self {
        Self {
            item_type: PathItemType::Array,
            origin: PathOrigin::Value,
            input,
            key: Some(Value::from(index)),
            value,
        }
    }

    /// Segment for a set member
    #[must_use]
    pub fn set(input: Value, value: Value) -> Self {
        Self {
            item_type: PathItemType::Set,
            origin: PathOrigin::Value,
            input,
            key: None,
            value: Some(value),
        }
    }
}

/// Prepends `segment` to the path of every issue.
///
/// Consumes the issues; order and every other field are preserved.
#[must_use]
pub fn prepend_path(mut issues: Vec<Issue>, segment: &PathItem) -> Vec<Issue> {
    for issue in &mut issues {
        issue.path.insert(0, segment.clone());
    }
    issues
}

/// Returns copies of `issues` with `segment` prepended to every path.
#[must_use]
pub fn extend_path(issues: &[Issue], segment: &PathItem) -> Vec<Issue> {
    prepend_path(issues.to_vec(), segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Kind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn issue(path: Vec<PathItem>, message: &str) -> Issue {
        Issue {
            kind: Kind::Validation,
            issue_type: "check".to_string(),
            input: Some(json!("x")),
            expected: None,
            received: "\"x\"".to_string(),
            message: message.to_string(),
            requirement: None,
            path,
            issues: Vec::new(),
            lang: None,
            abort_early: None,
            abort_pipe_early: None,
        }
    }

    #[test]
    fn test_extend_path_on_empty_path() {
        let segment = PathItem::object(json!({"a": "x"}), "a", Some(json!("x")));
        let issues = vec![issue(Vec::new(), "m")];

        let extended = extend_path(&issues, &segment);
        assert_eq!(extended[0].path, vec![segment]);
        assert!(issues[0].path.is_empty());
    }

    #[test]
    fn test_extend_path_prepends_root_first() {
        let child = PathItem::object(json!({"b": "x"}), "b", Some(json!("x")));
        let parent = PathItem::object(json!({"a": {"b": "x"}}), "a", Some(json!({"b": "x"})));
        let issues = vec![issue(vec![child.clone()], "m")];

        let extended = extend_path(&issues, &parent);
        assert_eq!(extended[0].path, vec![parent, child]);
    }

    #[test]
    fn test_extend_path_preserves_order_and_fields() {
        let segment = PathItem::array(json!([1, 2]), 1, Some(json!(2)));
        let issues = vec![issue(Vec::new(), "first"), issue(Vec::new(), "second")];

        let extended = prepend_path(issues.clone(), &segment);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended[0].message, "first");
        assert_eq!(extended[1].message, "second");
        assert_eq!(extended[1].input, issues[1].input);
        assert_eq!(extended[1].path[0].key, Some(json!(1)));
    }

    #[test]
    fn test_object_key_segment() {
        let segment = PathItem::object_key(json!({"k": 1}), "k", Some(json!(1)));
        assert_eq!(segment.item_type, PathItemType::Object);
        assert_eq!(segment.origin, PathOrigin::Key);
    }

    #[test]
    fn test_set_segment_has_no_key() {
        let segment = PathItem::set(json!([1]), json!(1));
        assert_eq!(segment.key, None);
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["type"], json!("set"));
        assert!(json.get("key").is_none());
    }
}
