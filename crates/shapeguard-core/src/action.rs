//! Action execution contracts.
//!
//! An action is one step of a pipe. Validation actions inspect a typed
//! dataset and append at most one issue; transformation actions replace the
//! value and never add issues. Neither may clear `typed`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::schema::Describe;

/// Synchronous pipe action
pub trait Action: Describe {
    /// Executes the action against the current dataset
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset;
}

/// Asynchronous pipe action
#[async_trait]
pub trait ActionAsync: Describe {
    /// Executes the action, possibly suspending
    async fn run_async(&self, dataset: Dataset, config: &Config) -> Dataset;
}

#[async_trait]
impl<T: Action + ?Sized> ActionAsync for T {
    async fn run_async(&self, dataset: Dataset, config: &Config) -> Dataset {
        self.run(dataset, config)
    }
}

/// Shared handle to a synchronous action
pub type PipeItem = Arc<dyn Action>;

/// Shared handle to an asynchronous action
pub type PipeItemAsync = Arc<dyn ActionAsync>;

impl<T: Action + ?Sized> Action for Arc<T> {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        (**self).run(dataset, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Kind;
    use crate::message::Message;
    use crate::schema::Reference;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct Double;

    impl Describe for Double {
        fn kind(&self) -> Kind {
            Kind::Transformation
        }

        fn type_tag(&self) -> &'static str {
            "double"
        }

        fn reference(&self) -> Reference {
            Reference("double")
        }

        fn expects(&self) -> Option<String> {
            None
        }

        fn requirement(&self) -> Option<Value> {
            None
        }

        fn message(&self) -> Option<&Message> {
            None
        }
    }

    impl Action for Double {
        fn run(&self, mut dataset: Dataset, _config: &Config) -> Dataset {
            if let Some(n) = dataset.value.as_i64() {
                dataset.value = json!(n * 2);
            }
            dataset
        }
    }

    #[test]
    fn test_action_replaces_value() {
        let dataset = Double.run(Dataset::typed(json!(4)), &Config::default());
        assert_eq!(dataset.value, json!(8));
        assert!(dataset.typed);
    }

    #[tokio::test]
    async fn test_sync_action_through_async_contract() {
        let action: PipeItemAsync = Arc::new(Double);
        let dataset = action
            .run_async(Dataset::typed(json!(3)), &Config::default())
            .await;
        assert_eq!(dataset.value, json!(6));
        assert!(!action.is_async());
    }

    #[test]
    fn test_shared_action_handle() {
        let action: PipeItem = Arc::new(Double);
        let shared = Arc::clone(&action);
        assert_eq!(shared.run(Dataset::typed(json!(1)), &Config::default()).value, json!(2));
        assert_eq!(action.type_tag(), "double");
    }
}
