//! Schema execution contracts.
//!
//! Every schema implements [`Describe`] for its metadata and either
//! [`Schema`] (never suspends) or [`SchemaAsync`] (may suspend at its own
//! execution boundary). Every `Schema` is also a `SchemaAsync` through a
//! blanket implementation, so async composites accept sync children as-is.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::issue::Kind;
use crate::message::Message;

/// Identity of the factory that produced a schema or action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference(pub &'static str);

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Metadata shared by schemas and actions
pub trait Describe: Send + Sync + fmt::Debug {
    /// Kind of the node
    fn kind(&self) -> Kind;

    /// Type tag reported in issues
    fn type_tag(&self) -> &'static str;

    /// Factory identity, used to look up specific messages
    fn reference(&self) -> Reference {
        Reference(self.type_tag())
    }

    /// Description of the accepted input
    fn expects(&self) -> Option<String> {
        None
    }

    /// Configured constraint of a validation action
    fn requirement(&self) -> Option<Value> {
        None
    }

    /// Message overriding the default issue message
    fn message(&self) -> Option<&Message> {
        None
    }

    /// Whether the node implements the async execution contract only
    fn is_async(&self) -> bool {
        false
    }
}

/// Value substituted for an absent or `null` input
#[derive(Clone)]
pub enum DefaultValue {
    /// Fixed value
    Literal(Value),
    /// Value computed on every use
    Computed(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Creates a fixed default
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a computed default
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Produces the value
    #[must_use]
    pub fn get(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

/// How a container treats a schema whose entry is absent
#[derive(Debug, Clone, Default)]
pub enum Entry {
    /// Absence is reported as a missing key
    #[default]
    Required,
    /// Absence is accepted; the default, if any, is validated in its place
    Optional {
        /// Value validated instead of the absent one
        default: Option<DefaultValue>,
    },
    /// Absence is replaced by the fallback value without validation
    Fallback(DefaultValue),
}

/// Synchronous schema
pub trait Schema: Describe {
    /// Validates `input` and returns the resulting dataset
    fn run(&self, input: Value, config: &Config) -> Dataset;

    /// Policy applied by containers when the entry is absent
    fn entry(&self) -> Entry {
        Entry::Required
    }
}

/// Asynchronous schema
#[async_trait]
pub trait SchemaAsync: Describe {
    /// Validates `input`, possibly suspending, and returns the resulting dataset
    async fn run_async(&self, input: Value, config: &Config) -> Dataset;

    /// Policy applied by containers when the entry is absent
    fn entry(&self) -> Entry {
        Entry::Required
    }
}

#[async_trait]
impl<T: Schema + ?Sized> SchemaAsync for T {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        self.run(input, config)
    }

    fn entry(&self) -> Entry {
        Schema::entry(self)
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn type_tag(&self) -> &'static str {
        (**self).type_tag()
    }

    fn reference(&self) -> Reference {
        (**self).reference()
    }

    fn expects(&self) -> Option<String> {
        (**self).expects()
    }

    fn requirement(&self) -> Option<Value> {
        (**self).requirement()
    }

    fn message(&self) -> Option<&Message> {
        (**self).message()
    }

    fn is_async(&self) -> bool {
        (**self).is_async()
    }
}

impl<T: Schema + ?Sized> Schema for Arc<T> {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        (**self).run(input, config)
    }

    fn entry(&self) -> Entry {
        Schema::entry(&**self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueDetails, add_issue};
    use serde_json::json;

    #[derive(Debug)]
    struct Boolean;

    impl Describe for Boolean {
        fn kind(&self) -> Kind {
            Kind::Schema
        }

        fn type_tag(&self) -> &'static str {
            "boolean"
        }

        fn expects(&self) -> Option<String> {
            Some("boolean".to_string())
        }
    }

    impl Schema for Boolean {
        fn run(&self, input: Value, config: &Config) -> Dataset {
            let mut dataset = Dataset::unknown(input);
            if dataset.value.is_boolean() {
                dataset.typed = true;
            } else {
                add_issue(self, "type", &mut dataset, config, IssueDetails::new());
            }
            dataset
        }
    }

    #[test]
    fn test_reference_defaults_to_type_tag() {
        assert_eq!(Boolean.reference(), Reference("boolean"));
        assert_eq!(Boolean.reference().to_string(), "boolean");
        assert!(!Boolean.is_async());
    }

    #[test]
    fn test_entry_defaults_to_required() {
        assert!(matches!(Schema::entry(&Boolean), Entry::Required));
    }

    #[test]
    fn test_default_value_literal_and_computed() {
        assert_eq!(DefaultValue::literal("x").get(), json!("x"));
        assert_eq!(DefaultValue::from(json!(2)).get(), json!(2));
        assert_eq!(DefaultValue::computed(|| json!([1])).get(), json!([1]));
        assert_eq!(format!("{:?}", DefaultValue::computed(|| json!(1))), "Computed(..)");
    }

    #[test]
    fn test_arc_schema_delegates() {
        let schema: Arc<dyn Schema> = Arc::new(Boolean);
        assert_eq!(schema.type_tag(), "boolean");
        assert!(schema.run(json!(true), &Config::default()).is_success());
        assert!(!schema.run(json!(1), &Config::default()).typed);
    }

    #[tokio::test]
    async fn test_sync_schema_runs_through_async_contract() {
        let schema: Box<dyn SchemaAsync> = Box::new(Boolean);
        let config = Config::default();
        let sync = Boolean.run(json!("no"), &config);
        let bridged = schema.run_async(json!("no"), &config).await;
        assert_eq!(sync, bridged);
    }
}
