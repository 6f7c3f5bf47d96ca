//! Merge rules shared by the sync and async forms of composite schemas.
//!
//! Both forms feed child datasets through the same helpers in the same
//! order, so suspension never changes which issues are reported or how they
//! are ordered.

use std::ops::ControlFlow;

use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, Describe, Entry, IssueDetails, PathItem, add_issue, prepend_path,
};

/// What a container does with an entry absent from its input
pub(crate) enum Missing {
    /// Validate this value in place of the absent one
    Run(Value),
    /// Store this value without validation
    Assign(Value),
    /// Leave the entry out of the output
    Skip,
    /// Report a missing key
    Report,
}

impl Missing {
    pub(crate) fn plan(entry: Entry) -> Self {
        match entry {
            Entry::Optional { default: Some(default) } => Self::Run(default.get()),
            Entry::Optional { default: None } => Self::Skip,
            Entry::Fallback(fallback) => Self::Assign(fallback.get()),
            Entry::Required => Self::Report,
        }
    }
}

/// A child result that was merged without stopping the container
pub(crate) struct Accepted {
    pub(crate) typed: bool,
    pub(crate) value: Value,
}

/// Merges a child dataset into its parent.
///
/// Child issues are re-exposed with `segment` prepended. Under abort-early
/// the first child with issues breaks the container and leaves it untyped;
/// otherwise an untyped child only marks the parent untyped.
pub(crate) fn merge_child(
    parent: &mut Dataset,
    child: Dataset,
    segment: impl FnOnce() -> PathItem,
    config: &Config,
) -> ControlFlow<(), Accepted> {
    let Dataset {
        typed,
        value,
        issues,
    } = child;

    if !issues.is_empty() {
        let segment = segment();
        parent.extend_issues(prepend_path(issues, &segment));
        if config.abort_early() {
            parent.typed = false;
            return ControlFlow::Break(());
        }
    }
    if !typed {
        parent.typed = false;
    }
    ControlFlow::Continue(Accepted { typed, value })
}

/// Rejects an input whose container type does not match
pub(crate) fn reject_type<D: Describe + ?Sized>(node: &D, input: Value, config: &Config) -> Dataset {
    let mut dataset = Dataset::unknown(input);
    add_issue(node, "type", &mut dataset, config, IssueDetails::new());
    dataset
}

/// Joins the expectations of several schemas, dropping duplicates
pub(crate) fn join_expects(expects: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for part in expects.into_iter().flatten() {
        if !parts.contains(&part) {
            parts.push(part);
        }
    }
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(parts.join(" | ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shapeguard_core::{DefaultValue, Issue, Kind};

    fn issue() -> Issue {
        Issue {
            kind: Kind::Schema,
            issue_type: "string".to_string(),
            input: Some(json!(1)),
            expected: Some("string".to_string()),
            received: "1".to_string(),
            message: "Invalid type: Expected string but received 1".to_string(),
            requirement: None,
            path: Vec::new(),
            issues: Vec::new(),
            lang: None,
            abort_early: None,
            abort_pipe_early: None,
        }
    }

    fn failed_child() -> Dataset {
        Dataset {
            typed: false,
            value: json!(1),
            issues: vec![issue()],
        }
    }

    #[test]
    fn test_plan_missing() {
        assert!(matches!(Missing::plan(Entry::Required), Missing::Report));
        assert!(matches!(
            Missing::plan(Entry::Optional { default: None }),
            Missing::Skip
        ));
        assert!(matches!(
            Missing::plan(Entry::Optional { default: Some(DefaultValue::literal(1)) }),
            Missing::Run(v) if v == json!(1)
        ));
        assert!(matches!(
            Missing::plan(Entry::Fallback(DefaultValue::literal("x"))),
            Missing::Assign(v) if v == json!("x")
        ));
    }

    #[test]
    fn test_merge_child_extends_path_and_untypes_parent() {
        let mut parent = Dataset::typed(json!({}));
        let flow = merge_child(
            &mut parent,
            failed_child(),
            || PathItem::object(json!({"a": 1}), "a", Some(json!(1))),
            &Config::default(),
        );

        assert!(matches!(flow, ControlFlow::Continue(Accepted { typed: false, .. })));
        assert!(!parent.typed);
        assert_eq!(parent.issues[0].path[0].key, Some(json!("a")));
    }

    #[test]
    fn test_merge_child_breaks_under_abort_early() {
        let mut parent = Dataset::typed(json!({}));
        let config = Config::builder().abort_early(true).build().unwrap();
        let flow = merge_child(
            &mut parent,
            failed_child(),
            || PathItem::array(json!([1]), 0, Some(json!(1))),
            &config,
        );

        assert!(flow.is_break());
        assert!(!parent.typed);
        assert_eq!(parent.issues.len(), 1);
    }

    #[test]
    fn test_merge_child_success_builds_no_segment() {
        let mut parent = Dataset::typed(json!([]));
        let flow = merge_child(
            &mut parent,
            Dataset::typed(json!("ok")),
            || unreachable!("segment is only built for failing children"),
            &Config::default(),
        );

        assert!(matches!(flow, ControlFlow::Continue(Accepted { typed: true, ref value }) if *value == json!("ok")));
        assert!(parent.is_success());
    }

    #[test]
    fn test_join_expects() {
        assert_eq!(join_expects([]), None);
        assert_eq!(
            join_expects([Some("string".to_string()), None, Some("string".to_string())]),
            Some("string".to_string())
        );
        assert_eq!(
            join_expects([Some("string".to_string()), Some("number".to_string())]),
            Some("string | number".to_string())
        );
    }
}
