//! The dataset carried through a validation run.

use serde::Serialize;
use serde_json::Value;

use crate::issue::Issue;

/// State of a validation attempt
///
/// `typed` becomes true once a schema confirmed the value's shape. Issues are
/// only ever appended, in the order they were encountered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Whether the value's shape has been confirmed
    pub typed: bool,

    /// Current value, replaced by transformations
    pub value: Value,

    /// Accumulated failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl Dataset {
    /// Creates an untyped dataset for a raw input
    #[must_use]
    pub fn unknown(value: Value) -> Self {
        Self {
            typed: false,
            value,
            issues: Vec::new(),
        }
    }

    /// Creates a typed dataset without issues
    #[must_use]
    pub fn typed(value: Value) -> Self {
        Self {
            typed: true,
            value,
            issues: Vec::new(),
        }
    }

    /// Returns true if at least one issue was recorded
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Returns true if the value is typed and no issue was recorded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.typed && self.issues.is_empty()
    }

    /// Appends issues, keeping their order
    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Converts the dataset into a tagged outcome
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        if self.is_success() {
            Outcome::Success { value: self.value }
        } else {
            Outcome::Failure {
                typed: self.typed,
                value: self.value,
                issues: self.issues,
            }
        }
    }
}

/// Final result of executing a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// The value was accepted
    Success {
        /// The accepted, possibly transformed value
        value: Value,
    },
    /// The value was rejected
    Failure {
        /// Whether the shape was confirmed despite the issues
        typed: bool,
        /// Value at the point execution stopped
        value: Value,
        /// Every recorded issue
        issues: Vec<Issue>,
    },
}

impl Outcome {
    /// Returns true if the value was accepted
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the issues of a failure, empty on success
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { issues, .. } => issues,
        }
    }
}
