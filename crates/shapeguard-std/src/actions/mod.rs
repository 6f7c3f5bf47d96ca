//! Action catalog.
//!
//! Validation actions only inspect typed datasets and append at most one
//! issue. Transformations replace the value and never report.

mod check;
mod format;
mod length;
mod transform;
mod value;

pub use check::{CheckAction, CheckActionAsync, check, check_async};
pub use format::{EmailAction, RegexAction, email, regex};
pub use length::{LengthAction, length, max_length, min_length, non_empty};
pub use transform::{
    StringTransform, TransformAction, TransformActionAsync, to_lower_case, to_upper_case, transform,
    transform_async, trim,
};
pub use value::{MultipleOfAction, ValueAction, max_value, min_value, multiple_of};

use serde_json::Value;
use shapeguard_core::{Config, Dataset, Describe, IssueDetails, add_issue};

/// Runs a validation step: `check` returns the issue details on failure.
pub(crate) fn validate<A: Describe + ?Sized>(
    action: &A,
    label: &str,
    mut dataset: Dataset,
    config: &Config,
    check: impl FnOnce(&Value) -> Option<IssueDetails>,
) -> Dataset {
    if !dataset.typed {
        return dataset;
    }
    if let Some(details) = check(&dataset.value) {
        add_issue(action, label, &mut dataset, config, details);
    }
    dataset
}

/// Converts a numeric requirement to JSON, keeping whole numbers integral so
/// they print without a fraction.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
