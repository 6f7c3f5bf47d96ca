//! Properties of the execution model checked across the whole catalog.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};
use shapeguard::actions::CheckAction;
use shapeguard::prelude::*;
use shapeguard::{PathItemType, PathOrigin, SchemaWithPipe, run_pipe};
use shapeguard_core::testing::{arb_typed_dataset, arb_value};

fn counting_check(calls: &Arc<AtomicUsize>, verdict: bool) -> CheckAction {
    let calls = Arc::clone(calls);
    check(move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        verdict
    })
}

fn abort_pipe() -> Config {
    Config::builder().abort_pipe_early(true).build().unwrap()
}

fn sample_schema() -> SchemaWithPipe {
    pipe!(
        union![string(), array(unknown())],
        min_length(2),
        max_length(5),
        check(|value| value != &json!("taken")),
    )
}

proptest! {
    #[test]
    fn prop_schema_issues_are_a_prefix_of_pipe_issues(input in arb_value()) {
        let schema_only = union![string(), array(unknown())].run(input.clone(), &Config::default());
        let piped = sample_schema().run(input, &Config::default());

        prop_assert!(piped.issues.len() >= schema_only.issues.len());
        prop_assert_eq!(&piped.issues[..schema_only.issues.len()], &schema_only.issues[..]);
    }

    #[test]
    fn prop_typed_never_reverts(input in arb_value()) {
        let schema_only = union![string(), array(unknown())].run(input.clone(), &Config::default());
        let piped = sample_schema().run(input, &Config::default());

        prop_assert_eq!(piped.typed, schema_only.typed);
        if !schema_only.typed {
            prop_assert_eq!(piped, schema_only);
        }
    }

    #[test]
    fn prop_pipe_keeps_prior_issues(dataset in arb_typed_dataset()) {
        let actions: Vec<shapeguard::action::PipeItem> = vec![
            Arc::new(check(|_| false)),
            Arc::new(transform(|value| json!([value]))),
        ];
        let prior = dataset.issues.clone();
        let result = run_pipe(dataset, &actions, &Config::default());

        prop_assert!(result.typed);
        prop_assert_eq!(&result.issues[..prior.len()], &prior[..]);
        prop_assert_eq!(result.issues.len(), prior.len() + 1);
    }

    #[test]
    fn prop_abort_pipe_early_adds_at_most_one_issue(input in "[a-z ]{0,10}") {
        let schema = pipe!(string(), min_length(3), max_length(4), check(|v| v != &json!("")));
        let dataset = schema.run(json!(input), &abort_pipe());
        prop_assert!(dataset.issues.len() <= 1);
    }

    #[test]
    fn prop_async_form_matches_sync_form(input in arb_value()) {
        let sync_schema = object! {
            "a" => sample_schema(),
            "b" => optional(record(string(), number())),
        };
        let async_schema = object_async()
            .with_entry("a", sample_schema())
            .with_entry("b", optional_async(record_async(string(), number())));
        let input = json!({"a": input.clone(), "b": {"k": input}});

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let actual = runtime.block_on(async_schema.run_async(input.clone(), &Config::default()));
        let expected = sync_schema.run(input, &Config::default());
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn test_abort_pipe_early_stops_after_first_failure() {
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let schema = pipe!(
        string(),
        counting_check(&before, false),
        counting_check(&after, true),
    );

    let full = schema.run(json!("x"), &Config::default());
    assert_eq!(full.issues.len(), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);

    let aborted = schema.run(json!("x"), &abort_pipe());
    assert_eq!(aborted.issues.len(), 1);
    assert!(aborted.typed);
    assert_eq!(before.load(Ordering::SeqCst), 2);
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[test]
fn test_untyped_schema_skips_every_action() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = pipe!(number(), counting_check(&calls, true), trim());

    let dataset = schema.run(json!("7"), &Config::default());
    assert!(!dataset.typed);
    assert_eq!(dataset.value, json!("7"));
    assert_eq!(dataset.issues.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_nested_path_is_root_first() {
    let schema = object! { "a" => object! { "b" => string() } };
    let input = json!({"a": {"b": 1}});
    let dataset = execute(&schema, input.clone(), &Config::default());

    let issue = &dataset.issues[0];
    assert_eq!(issue.path.len(), 2);
    assert_eq!(issue.path[0].item_type, PathItemType::Object);
    assert_eq!(issue.path[0].origin, PathOrigin::Value);
    assert_eq!(issue.path[0].key, Some(json!("a")));
    assert_eq!(issue.path[0].input, input);
    assert_eq!(issue.path[1].key, Some(json!("b")));
    assert_eq!(issue.path[1].value, Some(json!(1)));
    assert_eq!(dot_path(issue).as_deref(), Some("a.b"));
}

#[test]
fn test_fallback_suppresses_nested_failures() {
    let schema = object! {
        "settings" => fallback(object! { "depth" => number() }, json!({"depth": 1})),
    };
    let dataset = execute(&schema, json!({"settings": {"depth": "deep"}}), &Config::default());

    assert!(dataset.is_success());
    assert_eq!(dataset.value, json!({"settings": {"depth": 1}}));
}

#[test]
fn test_outcome_and_flatten() {
    let schema = object! {
        "name" => pipe!(string(), min_length(2)),
        "tags" => array(string()),
    };
    let dataset = execute(&schema, json!({"name": "A", "tags": ["x", 2]}), &Config::default());
    let flat = flatten(&dataset.issues);

    assert_eq!(flat.nested.get("name").map(Vec::len), Some(1));
    assert_eq!(flat.nested.get("tags.1").map(Vec::len), Some(1));
    assert!(flat.root.is_empty());

    let outcome = dataset.into_outcome();
    assert!(!outcome.is_success());
    assert_eq!(outcome.issues().len(), 2);

    let value: Value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["status"], json!("failure"));
}
