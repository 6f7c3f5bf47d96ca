//! Custom predicates.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use shapeguard_core::{
    Action, ActionAsync, Config, Dataset, Describe, IssueDetails, Kind, Message, Reference,
    add_issue,
};

use super::validate;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type PredicateAsync = Arc<dyn Fn(Value) -> BoxFuture<'static, bool> + Send + Sync>;

/// Validates a value with a caller supplied predicate
#[derive(Clone)]
pub struct CheckAction {
    predicate: Predicate,
    message: Option<Message>,
}

impl CheckAction {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for CheckAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckAction")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Describe for CheckAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        "check"
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for CheckAction {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "input", dataset, config, |value| {
            (!(self.predicate)(value)).then(IssueDetails::new)
        })
    }
}

/// Requires `predicate` to hold for the value
#[must_use]
pub fn check<F>(predicate: F) -> CheckAction
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    CheckAction {
        predicate: Arc::new(predicate),
        message: None,
    }
}

/// Validates a value with an awaitable predicate
#[derive(Clone)]
pub struct CheckActionAsync {
    predicate: PredicateAsync,
    message: Option<Message>,
}

impl CheckActionAsync {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for CheckActionAsync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckActionAsync")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Describe for CheckActionAsync {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        "check"
    }

    fn reference(&self) -> Reference {
        Reference("check_async")
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl ActionAsync for CheckActionAsync {
    async fn run_async(&self, mut dataset: Dataset, config: &Config) -> Dataset {
        if dataset.typed && !(self.predicate)(dataset.value.clone()).await {
            add_issue(self, "input", &mut dataset, config, IssueDetails::new());
        }
        dataset
    }
}

/// Requires the awaited `predicate` to hold for the value
#[must_use]
pub fn check_async<F, Fut>(predicate: F) -> CheckActionAsync
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    CheckActionAsync {
        predicate: Arc::new(move |value| predicate(value).boxed()),
        message: None,
    }
}
