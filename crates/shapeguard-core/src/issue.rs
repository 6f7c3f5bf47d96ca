//! Issue records and issue construction.
//!
//! An [`Issue`] describes one failure encountered while executing a schema
//! or an action. Failures are data: they are appended to the dataset and
//! never raised as errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::message;
use crate::path::PathItem;
use crate::schema::Describe;

/// Kind of a schema, an action, or the issue it produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    /// Shape check of a schema
    Schema,
    /// Refinement step that may reject a well-shaped value
    Validation,
    /// Step that derives a new value
    Transformation,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Validation => write!(f, "validation"),
            Self::Transformation => write!(f, "transformation"),
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Kind of the node that produced the issue
    pub kind: Kind,

    /// Type tag of the failing schema or action
    #[serde(rename = "type")]
    pub issue_type: String,

    /// The failing input, `None` when the value was absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    /// Description of the accepted input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Description of the received input
    pub received: String,

    /// Human readable message
    pub message: String,

    /// Configured constraint of a validation action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Value>,

    /// Location of the failure, root first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathItem>,

    /// Nested issues reported by composite schemas
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,

    /// Locale used for message selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Abort-early policy in effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_early: Option<bool>,

    /// Abort-pipe-early policy in effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_pipe_early: Option<bool>,
}

impl Issue {
    /// Returns true if the issue was produced by a shape check
    #[must_use]
    pub fn is_schema_issue(&self) -> bool {
        self.kind == Kind::Schema
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match dot_path(self) {
            Some(path) => write!(f, "{path}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
enum InputOverride {
    #[default]
    Dataset,
    Value(Value),
    Absent,
}

/// Optional overrides applied while building an issue
#[derive(Debug, Clone, Default)]
pub struct IssueDetails {
    input: InputOverride,
    expected: Option<String>,
    received: Option<String>,
    path: Vec<PathItem>,
    issues: Vec<Issue>,
}

impl IssueDetails {
    /// Creates empty details; every field falls back to the source and dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `value` as the failing input instead of the dataset value
    #[must_use]
    pub fn input(mut self, value: Value) -> Self {
        self.input = InputOverride::Value(value);
        self
    }

    /// Reports the failing input as absent
    #[must_use]
    pub fn absent(mut self) -> Self {
        self.input = InputOverride::Absent;
        self
    }

    /// Overrides the expected description
    #[must_use]
    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Overrides the received description
    #[must_use]
    pub fn received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }

    /// Sets the issue path
    #[must_use]
    pub fn path(mut self, path: Vec<PathItem>) -> Self {
        self.path = path;
        self
    }

    /// Attaches nested issues
    #[must_use]
    pub fn issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }
}

/// Describes a received value for issue messages.
///
/// Strings are quoted, numbers and booleans are printed verbatim, containers
/// are named by their kind and an absent value reads `undefined`.
#[must_use]
pub fn describe_received(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => format!("\"{s}\""),
        Some(Value::Array(_)) => "Array".to_string(),
        Some(Value::Object(_)) => "Object".to_string(),
    }
}

/// Builds an issue for `source` and appends it to `dataset`.
///
/// `label` names what was invalid (`type`, `key`, `length`, ...) and only
/// feeds the default message. Schema issues mark the dataset untyped.
pub fn add_issue<D: Describe + ?Sized>(
    source: &D,
    label: &str,
    dataset: &mut Dataset,
    config: &Config,
    details: IssueDetails,
) {
    let input = match details.input {
        InputOverride::Dataset => Some(dataset.value.clone()),
        InputOverride::Value(value) => Some(value),
        InputOverride::Absent => None,
    };
    let expected = details.expected.or_else(|| source.expects());
    let received = details
        .received
        .unwrap_or_else(|| describe_received(input.as_ref()));

    let default_message = match &expected {
        Some(expected) => format!("Invalid {label}: Expected {expected} but received {received}"),
        None => format!("Invalid {label}: Received {received}"),
    };

    let kind = source.kind();
    let mut issue = Issue {
        kind,
        issue_type: source.type_tag().to_string(),
        input,
        expected,
        received,
        message: default_message,
        requirement: source.requirement(),
        path: details.path,
        issues: details.issues,
        lang: config.lang().map(str::to_string),
        abort_early: config.abort_early_setting(),
        abort_pipe_early: config.abort_pipe_early_setting(),
    };

    if let Some(message) = message::resolve(source, config) {
        issue.message = message.render(&issue);
    }

    if kind == Kind::Schema {
        dataset.typed = false;
    }
    dataset.issues.push(issue);
}

/// Renders the path of an issue in dot notation.
///
/// Returns `None` for root issues and for paths containing keys that are
/// neither strings nor numbers.
#[must_use]
pub fn dot_path(issue: &Issue) -> Option<String> {
    if issue.path.is_empty() {
        return None;
    }

    let mut segments = Vec::with_capacity(issue.path.len());
    for item in &issue.path {
        match &item.key {
            Some(Value::String(key)) => segments.push(key.clone()),
            Some(Value::Number(key)) => segments.push(key.to_string()),
            _ => return None,
        }
    }
    Some(segments.join("."))
}

/// Issue messages grouped by location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatErrors {
    /// Messages of issues without a path
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub root: Vec<String>,

    /// Messages keyed by dot path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nested: BTreeMap<String, Vec<String>>,

    /// Messages whose path cannot be rendered in dot notation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

/// Groups issue messages by their dot path, preserving issue order.
#[must_use]
pub fn flatten(issues: &[Issue]) -> FlatErrors {
    let mut flat = FlatErrors::default();
    for issue in issues {
        if issue.path.is_empty() {
            flat.root.push(issue.message.clone());
        } else if let Some(path) = dot_path(issue) {
            flat.nested
                .entry(path)
                .or_default()
                .push(issue.message.clone());
        } else {
            flat.other.push(issue.message.clone());
        }
    }
    flat
}
