//! Array schemas.

use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, Describe, IssueDetails, Kind, Message, PathItem, Reference, Schema,
    SchemaAsync, add_issue,
};

use super::composite::{merge_child, reject_type};

/// Progress of a run over array items, shared by arrays and tuples
pub(super) struct ItemsRun<'a> {
    input: &'a Value,
    dataset: Dataset,
    output: Vec<Value>,
    holes: usize,
}

impl<'a> ItemsRun<'a> {
    pub(super) fn new(input: &'a Value, capacity: usize) -> Self {
        Self {
            input,
            dataset: Dataset::typed(Value::Null),
            output: Vec::with_capacity(capacity),
            holes: 0,
        }
    }

    /// Leaves a position out. It is filled with `null` only if a later
    /// position produces a value.
    pub(super) fn skip(&mut self) {
        self.holes += 1;
    }

    fn store(&mut self, value: Value) {
        self.output
            .extend(std::iter::repeat_n(Value::Null, std::mem::take(&mut self.holes)));
        self.output.push(value);
    }

    pub(super) fn accept(
        &mut self,
        index: usize,
        value: Option<&Value>,
        child: Dataset,
        config: &Config,
    ) -> ControlFlow<()> {
        let input = self.input;
        let segment = || PathItem::array(input.clone(), index, value.cloned());
        let accepted = merge_child(&mut self.dataset, child, segment, config)?;
        self.store(accepted.value);
        ControlFlow::Continue(())
    }

    pub(super) fn push(&mut self, value: Value) {
        self.store(value);
    }

    pub(super) fn report_missing<D: Describe + ?Sized>(
        &mut self,
        node: &D,
        index: usize,
        config: &Config,
    ) -> ControlFlow<()> {
        add_issue(
            node,
            "key",
            &mut self.dataset,
            config,
            IssueDetails::new()
                .absent()
                .expected(index.to_string())
                .path(vec![PathItem::array(self.input.clone(), index, None)]),
        );
        if config.abort_early() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub(super) fn finish(mut self) -> Dataset {
        self.dataset.value = Value::Array(self.output);
        self.dataset
    }
}

/// Array schema validating every item with one synchronous schema
#[derive(Debug, Clone)]
pub struct ArraySchema {
    item: Arc<dyn Schema>,
    message: Option<Message>,
}

impl ArraySchema {
    /// Overrides the message of the array's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for ArraySchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "array"
    }

    fn expects(&self) -> Option<String> {
        Some("Array".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for ArraySchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let Value::Array(items) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ItemsRun::new(&input, items.len());
        for (index, value) in items.iter().enumerate() {
            let child = self.item.run(value.clone(), config);
            if run.accept(index, Some(value), child, config).is_break() {
                break;
            }
        }
        run.finish()
    }
}

/// Array schema whose item schema may suspend
#[derive(Debug, Clone)]
pub struct ArraySchemaAsync {
    item: Arc<dyn SchemaAsync>,
    message: Option<Message>,
}

impl ArraySchemaAsync {
    /// Overrides the message of the array's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for ArraySchemaAsync {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "array"
    }

    fn reference(&self) -> Reference {
        Reference("array_async")
    }

    fn expects(&self) -> Option<String> {
        Some("Array".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl SchemaAsync for ArraySchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let Value::Array(items) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ItemsRun::new(&input, items.len());
        for (index, value) in items.iter().enumerate() {
            let child = self.item.run_async(value.clone(), config).await;
            if run.accept(index, Some(value), child, config).is_break() {
                break;
            }
        }
        run.finish()
    }
}

/// Creates an array schema
#[must_use]
pub fn array(item: impl Schema + 'static) -> ArraySchema {
    ArraySchema {
        item: Arc::new(item),
        message: None,
    }
}

/// Creates an async array schema
#[must_use]
pub fn array_async(item: impl SchemaAsync + 'static) -> ArraySchemaAsync {
    ArraySchemaAsync {
        item: Arc::new(item),
        message: None,
    }
}
