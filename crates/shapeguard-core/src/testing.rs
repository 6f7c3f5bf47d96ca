//! Property-testing strategies for datasets and issues.
//!
//! Enabled with the `testing` feature.

use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::dataset::Dataset;
use crate::issue::{Issue, Kind};

/// Strategy producing arbitrary JSON values up to a small depth
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy producing validation issues without a path
pub fn arb_issue() -> impl Strategy<Value = Issue> {
    ("[a-z_]{1,12}", arb_value(), "[ -~]{0,24}").prop_map(|(issue_type, input, message)| {
        let received = crate::issue::describe_received(Some(&input));
        Issue {
            kind: Kind::Validation,
            issue_type,
            input: Some(input),
            expected: None,
            received,
            message,
            requirement: None,
            path: Vec::new(),
            issues: Vec::new(),
            lang: None,
            abort_early: None,
            abort_pipe_early: None,
        }
    })
}

/// Strategy producing typed datasets with up to three prior issues
pub fn arb_typed_dataset() -> impl Strategy<Value = Dataset> {
    (arb_value(), prop::collection::vec(arb_issue(), 0..3)).prop_map(|(value, issues)| Dataset {
        typed: true,
        value,
        issues,
    })
}
