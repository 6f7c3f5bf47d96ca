//! Tuple schemas.
//!
//! Each position has its own schema. A position absent from the input is
//! settled by the schema's entry policy; items past the last position are
//! dropped from the output. An omitted position followed by a produced one
//! is kept as `null` so later positions keep their index.

use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, Describe, Entry, Kind, Message, Reference, Schema, SchemaAsync,
};

use super::array::ItemsRun;
use super::composite::{Missing, reject_type};

/// What to do at one tuple position
enum Slot {
    Run(Value),
    Settled,
    Stop,
}

fn slot<D: Describe + ?Sized>(
    run: &mut ItemsRun<'_>,
    node: &D,
    items: &[Value],
    index: usize,
    entry: Entry,
    config: &Config,
) -> Slot {
    if let Some(value) = items.get(index) {
        return Slot::Run(value.clone());
    }
    match Missing::plan(entry) {
        Missing::Run(default) => Slot::Run(default),
        Missing::Assign(fallback) => {
            run.push(fallback);
            Slot::Settled
        }
        Missing::Skip => {
            run.skip();
            Slot::Settled
        }
        Missing::Report => match run.report_missing(node, index, config) {
            ControlFlow::Continue(()) => Slot::Settled,
            ControlFlow::Break(()) => Slot::Stop,
        },
    }
}

/// Tuple schema with synchronous positions
#[derive(Debug, Clone, Default)]
pub struct TupleSchema {
    items: Vec<Arc<dyn Schema>>,
    message: Option<Message>,
}

impl TupleSchema {
    /// Creates a tuple without positions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position
    #[must_use]
    pub fn with_item(mut self, schema: impl Schema + 'static) -> Self {
        self.items.push(Arc::new(schema));
        self
    }

    /// Overrides the message of the tuple's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for TupleSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "tuple"
    }

    fn expects(&self) -> Option<String> {
        Some("Array".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for TupleSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let Value::Array(items) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ItemsRun::new(&input, self.items.len());
        for (index, schema) in self.items.iter().enumerate() {
            let child_input = match slot(&mut run, self, items, index, Schema::entry(&**schema), config) {
                Slot::Run(value) => value,
                Slot::Settled => continue,
                Slot::Stop => break,
            };
            let child = schema.run(child_input, config);
            if run.accept(index, items.get(index), child, config).is_break() {
                break;
            }
        }
        run.finish()
    }
}

/// Tuple schema whose positions may suspend
#[derive(Debug, Clone, Default)]
pub struct TupleSchemaAsync {
    items: Vec<Arc<dyn SchemaAsync>>,
    message: Option<Message>,
}

impl TupleSchemaAsync {
    /// Creates a tuple without positions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position
    #[must_use]
    pub fn with_item(mut self, schema: impl SchemaAsync + 'static) -> Self {
        self.items.push(Arc::new(schema));
        self
    }

    /// Overrides the message of the tuple's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for TupleSchemaAsync {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "tuple"
    }

    fn reference(&self) -> Reference {
        Reference("tuple_async")
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
impl SchemaAsync for TupleSchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let Value::Array(items) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ItemsRun::new(&input, self.items.len());
        for (index, schema) in self.items.iter().enumerate() {
            let entry = SchemaAsync::entry(&**schema);
            let child_input = match slot(&mut run, self, items, index, entry, config) {
                Slot::Run(value) => value,
                Slot::Settled => continue,
                Slot::Stop => break,
            };
            let child = schema.run_async(child_input, config).await;
            if run.accept(index, items.get(index), child, config).is_break() {
                break;
            }
        }
        run.finish()
    }
}

/// Creates an empty tuple schema; positions are added with `with_item`
#[must_use]
pub fn tuple() -> TupleSchema {
    TupleSchema::new()
}

/// Creates an empty async tuple schema
#[must_use]
pub fn tuple_async() -> TupleSchemaAsync {
    TupleSchemaAsync::new()
}
