//! Async composites mixing sync and async children.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use shapeguard_core::{Config, Describe, SchemaAsync, dot_path, execute, execute_async};
use shapeguard_std::actions::{CheckActionAsync, check_async, min_length, trim};
use shapeguard_std::schemas::{array, array_async, number, object, object_async, string};
use shapeguard_std::{pipe, pipe_async};

type Log = Arc<Mutex<Vec<&'static str>>>;

fn recording_check(log: &Log, name: &'static str, delay: Duration) -> CheckActionAsync {
    let log = Arc::clone(log);
    check_async(move |value: Value| {
        let log = Arc::clone(&log);
        async move {
            tokio::time::sleep(delay).await;
            log.lock().unwrap().push(name);
            !value.is_null()
        }
    })
}

#[tokio::test]
async fn test_children_are_awaited_in_declared_order() {
    let log: Log = Arc::default();
    let schema = object_async()
        .with_entry(
            "slow",
            pipe_async(string()).with_action(recording_check(&log, "slow", Duration::from_millis(30))),
        )
        .with_entry(
            "fast",
            pipe_async(string()).with_action(recording_check(&log, "fast", Duration::ZERO)),
        );

    let dataset = execute_async(&schema, json!({"slow": "a", "fast": "b"}), &Config::default()).await;

    assert!(dataset.is_success());
    assert_eq!(*log.lock().unwrap(), vec!["slow", "fast"]);
    assert!(schema.is_async());
}

#[tokio::test]
async fn test_mixed_pipe_reports_every_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema = pipe_async(string())
        .with_action(trim())
        .with_action(min_length(3))
        .with_action(check_async(move |value: Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { value.as_str() != Some("ab") }
        }));

    let dataset = execute_async(&schema, json!("  ab  "), &Config::default()).await;
    assert!(dataset.typed);
    assert_eq!(dataset.value, json!("ab"));
    let types: Vec<_> = dataset.issues.iter().map(|i| i.issue_type.as_str()).collect();
    assert_eq!(types, vec!["min_length", "check"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let config = Config::builder().abort_pipe_early(true).build().unwrap();
    let dataset = execute_async(&schema, json!("  ab  "), &config).await;
    assert_eq!(dataset.issues.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_async_tree_matches_sync_tree() {
    let sync_schema = array(
        object()
            .with_entry("name", pipe(string()).with_action(min_length(2)))
            .with_entry("age", number()),
    );
    let async_schema = array_async(
        object_async()
            .with_entry("name", pipe(string()).with_action(min_length(2)))
            .with_entry("age", number()),
    );

    let input = json!([{"name": "Ada", "age": 1}, {"name": "B"}, {"name": 3, "age": "x"}]);
    let expected = execute(&sync_schema, input.clone(), &Config::default());
    let actual = execute_async(&async_schema, input, &Config::default()).await;

    assert_eq!(actual, expected);
    let paths: Vec<_> = actual.issues.iter().filter_map(dot_path).collect();
    assert_eq!(paths, vec!["1.name", "1.age", "2.name", "2.age"]);
}

#[tokio::test]
async fn test_sync_schema_through_async_contract() {
    let schema: Box<dyn SchemaAsync> = Box::new(pipe(string()).with_action(min_length(1)));
    let dataset = schema.run_async(json!(""), &Config::default()).await;
    assert_eq!(dataset.issues[0].issue_type, "min_length");
    assert!(!schema.is_async());
}
