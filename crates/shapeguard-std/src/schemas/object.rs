//! Object schemas.
//!
//! Declared entries are validated in declaration order. Absent entries are
//! settled by the child's [`Entry`] policy; keys the schema does not declare
//! are dropped, kept or rejected depending on [`UnknownKeys`].

use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shapeguard_core::{
    Config, Dataset, Describe, Entry, IssueDetails, Kind, Message, PathItem, Reference, Schema,
    SchemaAsync, add_issue,
};

use super::composite::{Missing, merge_child, reject_type};

/// Treatment of keys that no entry declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Leave them out of the output
    Strip,
    /// Copy them to the output unvalidated
    Keep,
    /// Report the first one as an issue
    Reject,
}

impl UnknownKeys {
    fn tag(self) -> &'static str {
        match self {
            Self::Strip => "object",
            Self::Keep => "loose_object",
            Self::Reject => "strict_object",
        }
    }

    fn async_reference(self) -> Reference {
        match self {
            Self::Strip => Reference("object_async"),
            Self::Keep => Reference("loose_object_async"),
            Self::Reject => Reference("strict_object_async"),
        }
    }
}

/// Progress of one object run, shared by both execution forms
struct ObjectRun<'a> {
    input: &'a Value,
    fields: &'a Map<String, Value>,
    dataset: Dataset,
    output: Map<String, Value>,
    aborted: bool,
}

impl<'a> ObjectRun<'a> {
    fn new(input: &'a Value, fields: &'a Map<String, Value>) -> Self {
        Self {
            input,
            fields,
            dataset: Dataset::typed(Value::Null),
            output: Map::new(),
            aborted: false,
        }
    }

    /// Returns the value to validate for `key`, `None` when the entry was
    /// settled without running its schema.
    fn child_input<D: Describe + ?Sized>(
        &mut self,
        node: &D,
        key: &str,
        entry: Entry,
        config: &Config,
    ) -> ControlFlow<(), Option<Value>> {
        if let Some(value) = self.fields.get(key) {
            return ControlFlow::Continue(Some(value.clone()));
        }

        match Missing::plan(entry) {
            Missing::Run(default) => ControlFlow::Continue(Some(default)),
            Missing::Assign(fallback) => {
                self.output.insert(key.to_string(), fallback);
                ControlFlow::Continue(None)
            }
            Missing::Skip => ControlFlow::Continue(None),
            Missing::Report => {
                add_issue(
                    node,
                    "key",
                    &mut self.dataset,
                    config,
                    IssueDetails::new()
                        .absent()
                        .expected(format!("\"{key}\""))
                        .path(vec![PathItem::object(self.input.clone(), key, None)]),
                );
                if config.abort_early() {
                    self.aborted = true;
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(None)
            }
        }
    }

    fn accept(&mut self, key: &str, child: Dataset, config: &Config) -> ControlFlow<()> {
        let (input, fields) = (self.input, self.fields);
        let segment = || PathItem::object(input.clone(), key, fields.get(key).cloned());
        match merge_child(&mut self.dataset, child, segment, config) {
            ControlFlow::Continue(accepted) => {
                self.output.insert(key.to_string(), accepted.value);
                ControlFlow::Continue(())
            }
            ControlFlow::Break(()) => {
                self.aborted = true;
                ControlFlow::Break(())
            }
        }
    }

    fn finish<D: Describe + ?Sized>(
        mut self,
        node: &D,
        unknown_keys: UnknownKeys,
        declares: impl Fn(&str) -> bool,
        config: &Config,
    ) -> Dataset {
        if !self.aborted {
            match unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Keep => {
                    for (key, value) in self.fields {
                        if !declares(key.as_str()) {
                            self.output.insert(key.clone(), value.clone());
                        }
                    }
                }
                UnknownKeys::Reject => {
                    let unknown = self.fields.iter().find(|(key, _)| !declares(key.as_str()));
                    if let Some((key, value)) = unknown {
                        add_issue(
                            node,
                            "key",
                            &mut self.dataset,
                            config,
                            IssueDetails::new()
                                .input(Value::String(key.clone()))
                                .expected("never")
                                .path(vec![PathItem::object_key(
                                    self.input.clone(),
                                    key.as_str(),
                                    Some(value.clone()),
                                )]),
                        );
                    }
                }
            }
        }
        self.dataset.value = Value::Object(self.output);
        self.dataset
    }
}

fn upsert<S: ?Sized>(entries: &mut Vec<(String, Arc<S>)>, key: String, schema: Arc<S>) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some(slot) => slot.1 = schema,
        None => entries.push((key, schema)),
    }
}

/// Object schema with synchronous entries
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    entries: Vec<(String, Arc<dyn Schema>)>,
    unknown_keys: UnknownKeys,
    message: Option<Message>,
}

impl ObjectSchema {
    /// Creates an object schema without entries
    #[must_use]
    pub fn new(unknown_keys: UnknownKeys) -> Self {
        Self {
            entries: Vec::new(),
            unknown_keys,
            message: None,
        }
    }

    /// Declares an entry, replacing any entry with the same key
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, schema: impl Schema + 'static) -> Self {
        self.with_shared_entry(key, Arc::new(schema))
    }

    /// Declares an entry backed by a shared schema
    #[must_use]
    pub fn with_shared_entry(mut self, key: impl Into<String>, schema: Arc<dyn Schema>) -> Self {
        upsert(&mut self.entries, key.into(), schema);
        self
    }

    /// Overrides the message of the object's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Declared keys in validation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn declares(&self, key: &str) -> bool {
        self.entries.iter().any(|(declared, _)| declared == key)
    }
}

impl Describe for ObjectSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        self.unknown_keys.tag()
    }

    fn expects(&self) -> Option<String> {
        Some("Object".to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for ObjectSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let Value::Object(fields) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ObjectRun::new(&input, fields);
        for (key, schema) in &self.entries {
            let child_input = match run.child_input(self, key, Schema::entry(&**schema), config) {
                ControlFlow::Continue(Some(value)) => value,
                ControlFlow::Continue(None) => continue,
                ControlFlow::Break(()) => break,
            };
            let child = schema.run(child_input, config);
            if run.accept(key, child, config).is_break() {
                break;
            }
        }
        run.finish(self, self.unknown_keys, |key| self.declares(key), config)
    }
}

/// Object schema whose entries may suspend
#[derive(Debug, Clone)]
pub struct ObjectSchemaAsync {
    entries: Vec<(String, Arc<dyn SchemaAsync>)>,
    unknown_keys: UnknownKeys,
    message: Option<Message>,
}

impl ObjectSchemaAsync {
    /// Creates an object schema without entries
    #[must_use]
    pub fn new(unknown_keys: UnknownKeys) -> Self {
        Self {
            entries: Vec::new(),
            unknown_keys,
            message: None,
        }
    }

    /// Declares an entry, replacing any entry with the same key
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, schema: impl SchemaAsync + 'static) -> Self {
        self.with_shared_entry(key, Arc::new(schema))
    }

    /// Declares an entry backed by a shared schema
    #[must_use]
    pub fn with_shared_entry(
        mut self,
        key: impl Into<String>,
        schema: Arc<dyn SchemaAsync>,
    ) -> Self {
        upsert(&mut self.entries, key.into(), schema);
        self
    }

    /// Overrides the message of the object's own issues
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Declared keys in validation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn declares(&self, key: &str) -> bool {
        self.entries.iter().any(|(declared, _)| declared == key)
    }
}

impl Describe for ObjectSchemaAsync {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        self.unknown_keys.tag()
    }

    fn reference(&self) -> Reference {
        self.unknown_keys.async_reference()
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
impl SchemaAsync for ObjectSchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let Value::Object(fields) = &input else {
            return reject_type(self, input, config);
        };

        let mut run = ObjectRun::new(&input, fields);
        for (key, schema) in &self.entries {
            let child_input = match run.child_input(self, key, SchemaAsync::entry(&**schema), config)
            {
                ControlFlow::Continue(Some(value)) => value,
                ControlFlow::Continue(None) => continue,
                ControlFlow::Break(()) => break,
            };
            let child = schema.run_async(child_input, config).await;
            if run.accept(key, child, config).is_break() {
                break;
            }
        }
        run.finish(self, self.unknown_keys, |key| self.declares(key), config)
    }
}

/// Creates an object schema that strips unknown keys
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema::new(UnknownKeys::Strip)
}

/// Creates an object schema that keeps unknown keys
#[must_use]
pub fn loose_object() -> ObjectSchema {
    ObjectSchema::new(UnknownKeys::Keep)
}

/// Creates an object schema that rejects unknown keys
#[must_use]
pub fn strict_object() -> ObjectSchema {
    ObjectSchema::new(UnknownKeys::Reject)
}

/// Creates an async object schema that strips unknown keys
#[must_use]
pub fn object_async() -> ObjectSchemaAsync {
    ObjectSchemaAsync::new(UnknownKeys::Strip)
}

/// Creates an async object schema that keeps unknown keys
#[must_use]
pub fn loose_object_async() -> ObjectSchemaAsync {
    ObjectSchemaAsync::new(UnknownKeys::Keep)
}

/// Creates an async object schema that rejects unknown keys
#[must_use]
pub fn strict_object_async() -> ObjectSchemaAsync {
    ObjectSchemaAsync::new(UnknownKeys::Reject)
}
