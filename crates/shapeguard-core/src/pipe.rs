//! Pipe composition.
//!
//! A pipe is the ordered list of actions run after a schema's base check.
//! Actions run in declared order and only against typed datasets. With
//! `abort_pipe_early` (or `abort_early`) the pipe stops at the first issue;
//! otherwise every action runs so that independent violations are reported
//! together.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

use crate::action::{Action, ActionAsync, PipeItem, PipeItemAsync};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::issue::Kind;
use crate::message::Message;
use crate::schema::{Describe, Entry, Reference, Schema, SchemaAsync};

fn should_stop(dataset: &Dataset, config: &Config) -> bool {
    dataset.has_issues() && config.aborts_pipe()
}

/// Runs `actions` against the base-check dataset of a schema.
///
/// An untyped dataset is returned unchanged without invoking any action.
#[must_use]
pub fn run_pipe(mut dataset: Dataset, actions: &[PipeItem], config: &Config) -> Dataset {
    if !dataset.typed {
        trace!(actions = actions.len(), "skipping pipe of untyped dataset");
        return dataset;
    }

    for (index, action) in actions.iter().enumerate() {
        if should_stop(&dataset, config) {
            debug!(
                skipped = actions.len() - index,
                "pipe aborted after first issue"
            );
            break;
        }
        dataset = action.run(dataset, config);
        debug_assert!(
            dataset.typed,
            "action `{}` cleared the typed flag",
            action.type_tag()
        );
    }
    dataset
}

/// Awaitable counterpart of [`run_pipe`]; actions are awaited one at a time.
pub async fn run_pipe_async(
    mut dataset: Dataset,
    actions: &[PipeItemAsync],
    config: &Config,
) -> Dataset {
    if !dataset.typed {
        trace!(actions = actions.len(), "skipping pipe of untyped dataset");
        return dataset;
    }

    for (index, action) in actions.iter().enumerate() {
        if should_stop(&dataset, config) {
            debug!(
                skipped = actions.len() - index,
                "pipe aborted after first issue"
            );
            break;
        }
        dataset = action.run_async(dataset, config).await;
        debug_assert!(
            dataset.typed,
            "action `{}` cleared the typed flag",
            action.type_tag()
        );
    }
    dataset
}

/// A schema followed by a pipe of actions
#[derive(Debug, Clone)]
pub struct SchemaWithPipe {
    schema: Arc<dyn Schema>,
    pipe: Vec<PipeItem>,
}

impl SchemaWithPipe {
    /// Creates a pipe with no actions
    #[must_use]
    pub fn new(schema: impl Schema + 'static) -> Self {
        Self {
            schema: Arc::new(schema),
            pipe: Vec::new(),
        }
    }

    /// Appends an action to the pipe
    #[must_use]
    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.pipe.push(Arc::new(action));
        self
    }

    /// Appends a shared action to the pipe
    #[must_use]
    pub fn with_shared_action(mut self, action: PipeItem) -> Self {
        self.pipe.push(action);
        self
    }

    /// The actions in declared order
    #[must_use]
    pub fn pipe(&self) -> &[PipeItem] {
        &self.pipe
    }
}

impl Describe for SchemaWithPipe {
    fn kind(&self) -> Kind {
        self.schema.kind()
    }

    fn type_tag(&self) -> &'static str {
        self.schema.type_tag()
    }

    fn reference(&self) -> Reference {
        self.schema.reference()
    }

    fn expects(&self) -> Option<String> {
        self.schema.expects()
    }

    fn message(&self) -> Option<&Message> {
        self.schema.message()
    }
}

impl Schema for SchemaWithPipe {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let dataset = self.schema.run(input, config);
        run_pipe(dataset, &self.pipe, config)
    }

    fn entry(&self) -> Entry {
        Schema::entry(&self.schema)
    }
}

/// An async-capable schema followed by a pipe of async-capable actions
#[derive(Debug, Clone)]
pub struct SchemaWithPipeAsync {
    schema: Arc<dyn SchemaAsync>,
    pipe: Vec<PipeItemAsync>,
}

impl SchemaWithPipeAsync {
    /// Creates a pipe with no actions
    #[must_use]
    pub fn new(schema: impl SchemaAsync + 'static) -> Self {
        Self {
            schema: Arc::new(schema),
            pipe: Vec::new(),
        }
    }

    /// Appends an action to the pipe
    #[must_use]
    pub fn with_action(mut self, action: impl ActionAsync + 'static) -> Self {
        self.pipe.push(Arc::new(action));
        self
    }

    /// Appends a shared action to the pipe
    #[must_use]
    pub fn with_shared_action(mut self, action: PipeItemAsync) -> Self {
        self.pipe.push(action);
        self
    }

    /// The actions in declared order
    #[must_use]
    pub fn pipe(&self) -> &[PipeItemAsync] {
        &self.pipe
    }
}

impl Describe for SchemaWithPipeAsync {
    fn kind(&self) -> Kind {
        self.schema.kind()
    }

    fn type_tag(&self) -> &'static str {
        self.schema.type_tag()
    }

    fn reference(&self) -> Reference {
        self.schema.reference()
    }

    fn expects(&self) -> Option<String> {
        self.schema.expects()
    }

    fn message(&self) -> Option<&Message> {
        self.schema.message()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl SchemaAsync for SchemaWithPipeAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let dataset = self.schema.run_async(input, config).await;
        run_pipe_async(dataset, &self.pipe, config).await
    }

    fn entry(&self) -> Entry {
        SchemaAsync::entry(&*self.schema)
    }
}
