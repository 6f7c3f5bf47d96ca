//! Transformations.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use shapeguard_core::{Action, ActionAsync, Config, Dataset, Describe, Kind, Reference};

type Operation = Arc<dyn Fn(Value) -> Value + Send + Sync>;
type OperationAsync = Arc<dyn Fn(Value) -> BoxFuture<'static, Value> + Send + Sync>;

/// Replaces the value with the result of a caller supplied function
#[derive(Clone)]
pub struct TransformAction {
    operation: Operation,
}

impl fmt::Debug for TransformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformAction").finish_non_exhaustive()
    }
}

impl Describe for TransformAction {
    fn kind(&self) -> Kind {
        Kind::Transformation
    }

    fn type_tag(&self) -> &'static str {
        "transform"
    }
}

impl Action for TransformAction {
    fn run(&self, mut dataset: Dataset, _config: &Config) -> Dataset {
        let value = std::mem::take(&mut dataset.value);
        dataset.value = (self.operation)(value);
        dataset
    }
}

/// Replaces the value with `operation(value)`
#[must_use]
pub fn transform<F>(operation: F) -> TransformAction
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    TransformAction {
        operation: Arc::new(operation),
    }
}

/// Replaces the value with the result of an awaitable function
#[derive(Clone)]
pub struct TransformActionAsync {
    operation: OperationAsync,
}

impl fmt::Debug for TransformActionAsync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformActionAsync").finish_non_exhaustive()
    }
}

impl Describe for TransformActionAsync {
    fn kind(&self) -> Kind {
        Kind::Transformation
    }

    fn type_tag(&self) -> &'static str {
        "transform"
    }

    fn reference(&self) -> Reference {
        Reference("transform_async")
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl ActionAsync for TransformActionAsync {
    async fn run_async(&self, mut dataset: Dataset, _config: &Config) -> Dataset {
        let value = std::mem::take(&mut dataset.value);
        dataset.value = (self.operation)(value).await;
        dataset
    }
}

/// Replaces the value with the awaited `operation(value)`
#[must_use]
pub fn transform_async<F, Fut>(operation: F) -> TransformActionAsync
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Value> + Send + 'static,
{
    TransformActionAsync {
        operation: Arc::new(move |value| operation(value).boxed()),
    }
}

/// Built-in string transformation; other values pass through unchanged
#[derive(Debug, Clone, Copy)]
pub struct StringTransform {
    tag: &'static str,
    apply: fn(&str) -> String,
}

impl Describe for StringTransform {
    fn kind(&self) -> Kind {
        Kind::Transformation
    }

    fn type_tag(&self) -> &'static str {
        self.tag
    }
}

impl Action for StringTransform {
    fn run(&self, mut dataset: Dataset, _config: &Config) -> Dataset {
        if let Value::String(s) = &dataset.value {
            dataset.value = Value::String((self.apply)(s));
        }
        dataset
    }
}

/// Removes leading and trailing whitespace
#[must_use]
pub fn trim() -> StringTransform {
    StringTransform {
        tag: "trim",
        apply: |s| s.trim().to_string(),
    }
}

/// Lowercases a string
#[must_use]
pub fn to_lower_case() -> StringTransform {
    StringTransform {
        tag: "to_lower_case",
        apply: str::to_lowercase,
    }
}

/// Uppercases a string
#[must_use]
pub fn to_upper_case() -> StringTransform {
    StringTransform {
        tag: "to_upper_case",
        apply: str::to_uppercase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_transform_replaces_value() {
        let action = transform(|value| json!({ "wrapped": value }));
        let dataset = action.run(Dataset::typed(json!(1)), &Config::default());
        assert_eq!(dataset.value, json!({"wrapped": 1}));
        assert_eq!(action.kind(), Kind::Transformation);
    }

    #[test]
    fn test_string_transforms() {
        let config = Config::default();
        assert_eq!(trim().run(Dataset::typed(json!("  a ")), &config).value, json!("a"));
        assert_eq!(to_lower_case().run(Dataset::typed(json!("AbC")), &config).value, json!("abc"));
        assert_eq!(to_upper_case().run(Dataset::typed(json!("x")), &config).value, json!("X"));
        assert_eq!(trim().run(Dataset::typed(json!(3)), &config).value, json!(3));
    }

    #[tokio::test]
    async fn test_transform_async() {
        let action = transform_async(|value: Value| async move {
            tokio::task::yield_now().await;
            json!(value.as_i64().unwrap_or_default() + 1)
        });
        let dataset = action
            .run_async(Dataset::typed(json!(1)), &Config::default())
            .await;
        assert_eq!(dataset.value, json!(2));
        assert!(dataset.issues.is_empty());
        assert!(action.is_async());
    }
}
