//! Union schemas.
//!
//! Options are tried in order and the first one that succeeds wins. When none
//! does, the result is chosen from the failures:
//!
//! * a single option that produced a typed value with issues is returned as is;
//! * several such options produce one `type` issue nesting all of their issues,
//!   and the union stays typed;
//! * otherwise a single untyped option is returned as is, and several produce
//!   one `type` issue nesting every option's issues.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, Describe, IssueDetails, Kind, Message, Reference, Schema, SchemaAsync,
    add_issue,
};
use tracing::trace;

use super::composite::join_expects;

#[derive(Default)]
struct UnionRun {
    typed: Vec<Dataset>,
    untyped: Vec<Dataset>,
}

impl UnionRun {
    /// Returns the dataset if it settles the union
    fn offer(&mut self, dataset: Dataset) -> Option<Dataset> {
        if dataset.is_success() {
            return Some(dataset);
        }
        if dataset.typed {
            self.typed.push(dataset);
        } else {
            self.untyped.push(dataset);
        }
        None
    }

    fn finish<D: Describe + ?Sized>(self, node: &D, input: Value, config: &Config) -> Dataset {
        let typed = !self.typed.is_empty();
        let mut candidates = if typed { self.typed } else { self.untyped };
        if candidates.len() == 1
            && let Some(dataset) = candidates.pop()
        {
            return dataset;
        }

        let issues = candidates
            .into_iter()
            .flat_map(|dataset| dataset.issues)
            .collect();
        let mut dataset = Dataset::unknown(input);
        add_issue(node, "type", &mut dataset, config, IssueDetails::new().issues(issues));
        if typed {
            dataset.typed = true;
        }
        dataset
    }
}

/// Union of synchronous schemas
#[derive(Debug, Clone, Default)]
pub struct UnionSchema {
    options: Vec<Arc<dyn Schema>>,
    message: Option<Message>,
}

impl UnionSchema {
    /// Appends an option
    #[must_use]
    pub fn with_option(mut self, schema: impl Schema + 'static) -> Self {
        self.options.push(Arc::new(schema));
        self
    }

    /// Overrides the message of the union's own issue
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for UnionSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "union"
    }

    fn expects(&self) -> Option<String> {
        join_expects(self.options.iter().map(|option| option.expects()))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for UnionSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let mut run = UnionRun::default();
        for (index, option) in self.options.iter().enumerate() {
            if let Some(dataset) = run.offer(option.run(input.clone(), config)) {
                trace!(option = index, "union option matched");
                return dataset;
            }
        }
        run.finish(self, input, config)
    }
}

/// Union whose options may suspend
#[derive(Debug, Clone, Default)]
pub struct UnionSchemaAsync {
    options: Vec<Arc<dyn SchemaAsync>>,
    message: Option<Message>,
}

impl UnionSchemaAsync {
    /// Appends an option
    #[must_use]
    pub fn with_option(mut self, schema: impl SchemaAsync + 'static) -> Self {
        self.options.push(Arc::new(schema));
        self
    }

    /// Overrides the message of the union's own issue
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for UnionSchemaAsync {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "union"
    }

    fn reference(&self) -> Reference {
        Reference("union_async")
    }

    fn expects(&self) -> Option<String> {
        join_expects(self.options.iter().map(|option| option.expects()))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl SchemaAsync for UnionSchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        let mut run = UnionRun::default();
        for (index, option) in self.options.iter().enumerate() {
            if let Some(dataset) = run.offer(option.run_async(input.clone(), config).await) {
                trace!(option = index, "union option matched");
                return dataset;
            }
        }
        run.finish(self, input, config)
    }
}

/// Creates an empty union; options are added with `with_option`
#[must_use]
pub fn union() -> UnionSchema {
    UnionSchema::default()
}

/// Creates an empty async union
#[must_use]
pub fn union_async() -> UnionSchemaAsync {
    UnionSchemaAsync::default()
}
