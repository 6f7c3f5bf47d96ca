//! Record schemas: objects with uniformly validated keys and values.

use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shapeguard_core::{
    Config, Dataset, Describe, Kind, Message, PathItem, Reference, Schema, SchemaAsync,
};

use super::composite::{Accepted, merge_child, reject_type};

struct RecordRun<'a> {
    input: &'a Value,
    dataset: Dataset,
    output: Map<String, Value>,
}

impl<'a> RecordRun<'a> {
    fn new(input: &'a Value) -> Self {
        Self {
            input,
            dataset: Dataset::typed(Value::Null),
            output: Map::new(),
        }
    }

    fn accept_key(
        &mut self,
        key: &str,
        value: &Value,
        child: Dataset,
        config: &Config,
    ) -> ControlFlow<(), Accepted> {
        let input = self.input;
        let segment = || PathItem::object_key(input.clone(), key, Some(value.clone()));
        merge_child(&mut self.dataset, child, segment, config)
    }

    fn accept_value(
        &mut self,
        key: &str,
        value: &Value,
        child: Dataset,
        config: &Config,
    ) -> ControlFlow<(), Accepted> {
        let input = self.input;
        let segment = || PathItem::object(input.clone(), key, Some(value.clone()));
        merge_child(&mut self.dataset, child, segment, config)
    }

    /// Keeps the entry only when both its key and its value are typed
    fn store(&mut self, key: Accepted, value: Accepted) {
        if key.typed && value.typed {
            let key = match key.value {
                Value::String(key) => key,
                other => other.to_string(),
            };
            self.output.insert(key, value.value);
        }
    }

    fn finish(mut self) -> Dataset {
        self.dataset.value = Value::Object(self.output);
        self.dataset
    }
}

/// Record schema with synchronous key and value schemas
#[derive(Debug, Clone)]
pub struct RecordSchema {
    key: Arc<dyn Schema>,
    value: Arc<dyn Schema>,
    message: Option<Message>,
}

impl RecordSchema {
    /// Overrides the message of the record's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for RecordSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "record"
    }

    fn expects(&self) -> Option<String> {
        Some("Object".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for RecordSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let Value::Object(fields) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = RecordRun::new(&input);
        for (key, value) in fields {
            let key_dataset = self.key.run(Value::String(key.clone()), config);
            let ControlFlow::Continue(key_out) = run.accept_key(key, value, key_dataset, config)
            else {
                break;
            };
            let value_dataset = self.value.run(value.clone(), config);
            let ControlFlow::Continue(value_out) =
                run.accept_value(key, value, value_dataset, config)
            else {
                break;
            };
            run.store(key_out, value_out);
        }
        run.finish()
    }
}

/// Record schema whose key or value schema may suspend
#[derive(Debug, Clone)]
pub struct RecordSchemaAsync {
    key: Arc<dyn SchemaAsync>,
    value: Arc<dyn SchemaAsync>,
    message: Option<Message>,
}

impl RecordSchemaAsync {
    /// Overrides the message of the record's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for RecordSchemaAsync {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "record"
    }

    fn reference(&self) -> Reference {
        Reference("record_async")
    }

    fn expects(&self) -> Option<String> {
        Some("Object".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl SchemaAsync for RecordSchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let Value::Object(fields) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = RecordRun::new(&input);
        for (key, value) in fields {
            let key_dataset = self.key.run_async(Value::String(key.clone()), config).await;
            let ControlFlow::Continue(key_out) = run.accept_key(key, value, key_dataset, config)
            else {
                break;
            };
            let value_dataset = self.value.run_async(value.clone(), config).await;
            let ControlFlow::Continue(value_out) =
                run.accept_value(key, value, value_dataset, config)
            else {
                break;
            };
            run.store(key_out, value_out);
        }
        run.finish()
    }
}

/// Creates a record schema
#[must_use]
pub fn record(key: impl Schema + 'static, value: impl Schema + 'static) -> RecordSchema {
    RecordSchema {
        key: Arc::new(key),
        value: Arc::new(value),
        message: None,
    }
}

/// Creates an async record schema
#[must_use]
pub fn record_async(
    key: impl SchemaAsync + 'static,
    value: impl SchemaAsync + 'static,
) -> RecordSchemaAsync {
    RecordSchemaAsync {
        key: Arc::new(key),
        value: Arc::new(value),
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{literal, number, string, union};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shapeguard_core::PathOrigin;

    #[test]
    fn test_valid_record() {
        let input = json!({"a": 1, "b": 2});
        let dataset = record(string(), number()).run(input.clone(), &Config::default());
        assert!(dataset.is_success());
        assert_eq!(dataset.value, input);
    }

    #[test]
    fn test_key_issue_has_key_origin() {
        let keys = union().with_option(literal("a")).with_option(literal("b"));
        let dataset = record(keys, number()).run(json!({"a": 1, "z": 2}), &Config::default());

        assert!(!dataset.typed);
        assert_eq!(dataset.issues.len(), 1);
        let segment = &dataset.issues[0].path[0];
        assert_eq!(segment.origin, PathOrigin::Key);
        assert_eq!(segment.key, Some(json!("z")));
        assert_eq!(dataset.value, json!({"a": 1}));
    }

    #[test]
    fn test_value_issue_drops_entry() {
        let dataset = record(string(), number()).run(json!({"a": "x", "b": 2}), &Config::default());

        assert_eq!(dataset.issues[0].path[0].origin, PathOrigin::Value);
        assert_eq!(dataset.value, json!({"b": 2}));
    }

    #[test]
    fn test_abort_early() {
        let config = Config::builder().abort_early(true).build().unwrap();
        let dataset = record(string(), number()).run(json!({"a": "x", "b": "y"}), &config);
        assert_eq!(dataset.issues.len(), 1);
    }

    #[tokio::test]
    async fn test_async_record_matches_sync_form() {
        for input in [json!({"a": 1}), json!({"a": "x", "b": null}), json!([])] {
            let expected = record(string(), number()).run(input.clone(), &Config::default());
            let actual = record_async(string(), number())
                .run_async(input, &Config::default())
                .await;
            assert_eq!(actual, expected);
        }
    }
}
