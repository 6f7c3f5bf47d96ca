//! Wrappers that widen or soften another schema.
//!
//! `optional` and `nullish` accept an absent container entry, `nullable` and
//! `nullish` accept `null`, and `fallback` replaces any failure with a fixed
//! value. Wrappers never report issues of their own.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, DefaultValue, Describe, Entry, Kind, Message, Reference, Schema, SchemaAsync,
};
use tracing::trace;

fn widen(expects: Option<String>, with: &str) -> Option<String> {
    expects.map(|expects| format!("({expects} | {with})"))
}

/// Settles a `null` input without running the wrapped schema, or returns the
/// value the wrapped schema should see.
fn intercept_null(input: Value, default: Option<&DefaultValue>) -> Result<Value, Dataset> {
    if !input.is_null() {
        return Ok(input);
    }
    match default.map(DefaultValue::get) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(Dataset::typed(Value::Null)),
    }
}

fn settle_fallback(dataset: Dataset, fallback: &DefaultValue) -> Dataset {
    if dataset.is_success() {
        return dataset;
    }
    trace!(issues = dataset.issues.len(), "fallback replaced failed value");
    Dataset::typed(fallback.get())
}

fn fallback_entry(wrapped: Entry, fallback: &DefaultValue) -> Entry {
    match wrapped {
        Entry::Required | Entry::Optional { default: None } => {
            Entry::Fallback(fallback.clone())
        }
        other => other,
    }
}

macro_rules! absence_wrapper {
    (@entry optional, $self:ident) => {
        Entry::Optional {
            default: $self.default.clone(),
        }
    };
    (@entry required, $self:ident) => {
        Entry::Required
    };
    (
        $(#[$sync_meta:meta])* $sync:ident,
        $(#[$async_meta:meta])* $async_name:ident,
        tag = $tag:literal,
        async_reference = $async_ref:literal,
        widen = $with:literal,
        null = $null:literal,
        entry = $entry:ident
    ) => {
        $(#[$sync_meta])*
        #[derive(Debug, Clone)]
        pub struct $sync {
            wrapped: Arc<dyn Schema>,
            default: Option<DefaultValue>,
        }

        impl $sync {
            /// Sets the value used in place of a missing input
            #[must_use]
            pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
                self.default = Some(default.into());
                self
            }
        }

        impl Describe for $sync {
            fn kind(&self) -> Kind {
                Kind::Schema
            }

            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn expects(&self) -> Option<String> {
                widen(self.wrapped.expects(), $with)
            }
        }

        impl Schema for $sync {
            fn run(&self, input: Value, config: &Config) -> Dataset {
                let input = if $null {
                    match intercept_null(input, self.default.as_ref()) {
                        Ok(input) => input,
                        Err(settled) => return settled,
                    }
                } else {
                    input
                };
                self.wrapped.run(input, config)
            }

            fn entry(&self) -> Entry {
                absence_wrapper!(@entry $entry, self)
            }
        }

        $(#[$async_meta])*
        #[derive(Debug, Clone)]
        pub struct $async_name {
            wrapped: Arc<dyn SchemaAsync>,
            default: Option<DefaultValue>,
        }

        impl $async_name {
            /// Sets the value used in place of a missing input
            #[must_use]
            pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
                self.default = Some(default.into());
                self
            }
        }

        impl Describe for $async_name {
            fn kind(&self) -> Kind {
                Kind::Schema
            }

            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn reference(&self) -> Reference {
                Reference($async_ref)
            }

            fn expects(&self) -> Option<String> {
                widen(self.wrapped.expects(), $with)
            }

            fn is_async(&self) -> bool {
                true
            }
        }

        #[async_trait]
        impl SchemaAsync for $async_name {
            async fn run_async(&self, input: Value, config: &Config) -> Dataset {
                let input = if $null {
                    match intercept_null(input, self.default.as_ref()) {
                        Ok(input) => input,
                        Err(settled) => return settled,
                    }
                } else {
                    input
                };
                self.wrapped.run_async(input, config).await
            }

            fn entry(&self) -> Entry {
                absence_wrapper!(@entry $entry, self)
            }
        }
    };
}

absence_wrapper!(
    /// Accepts an absent entry
    OptionalSchema,
    /// Async form of [`OptionalSchema`]
    OptionalSchemaAsync,
    tag = "optional",
    async_reference = "optional_async",
    widen = "undefined",
    null = false,
    entry = optional
);

absence_wrapper!(
    /// Accepts `null`
    NullableSchema,
    /// Async form of [`NullableSchema`]
    NullableSchemaAsync,
    tag = "nullable",
    async_reference = "nullable_async",
    widen = "null",
    null = true,
    entry = required
);

absence_wrapper!(
    /// Accepts `null` and an absent entry
    NullishSchema,
    /// Async form of [`NullishSchema`]
    NullishSchemaAsync,
    tag = "nullish",
    async_reference = "nullish_async",
    widen = "null | undefined",
    null = true,
    entry = optional
);

/// Creates an optional schema
#[must_use]
pub fn optional(wrapped: impl Schema + 'static) -> OptionalSchema {
    OptionalSchema {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Creates an optional schema validating `default` when the entry is absent
#[must_use]
pub fn optional_with_default(
    wrapped: impl Schema + 'static,
    default: impl Into<Value>,
) -> OptionalSchema {
    optional(wrapped).with_default(DefaultValue::literal(default))
}

/// Creates an async optional schema
#[must_use]
pub fn optional_async(wrapped: impl SchemaAsync + 'static) -> OptionalSchemaAsync {
    OptionalSchemaAsync {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Creates a nullable schema
#[must_use]
pub fn nullable(wrapped: impl Schema + 'static) -> NullableSchema {
    NullableSchema {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Creates an async nullable schema
#[must_use]
pub fn nullable_async(wrapped: impl SchemaAsync + 'static) -> NullableSchemaAsync {
    NullableSchemaAsync {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Creates a nullish schema
#[must_use]
pub fn nullish(wrapped: impl Schema + 'static) -> NullishSchema {
    NullishSchema {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Creates an async nullish schema
#[must_use]
pub fn nullish_async(wrapped: impl SchemaAsync + 'static) -> NullishSchemaAsync {
    NullishSchemaAsync {
        wrapped: Arc::new(wrapped),
        default: None,
    }
}

/// Schema replacing any failure of the wrapped schema with a fallback value.
///
/// Metadata is the wrapped schema's own, so issues and messages registered
/// for it are unaffected by the wrapper.
#[derive(Debug, Clone)]
pub struct FallbackSchema {
    wrapped: Arc<dyn Schema>,
    fallback: DefaultValue,
}

impl Describe for FallbackSchema {
    fn kind(&self) -> Kind {
        self.wrapped.kind()
    }

    fn type_tag(&self) -> &'static str {
        self.wrapped.type_tag()
    }

    fn reference(&self) -> Reference {
        self.wrapped.reference()
    }

    fn expects(&self) -> Option<String> {
        self.wrapped.expects()
    }

    fn message(&self) -> Option<&Message> {
        self.wrapped.message()
    }
}

impl Schema for FallbackSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        settle_fallback(self.wrapped.run(input, config), &self.fallback)
    }

    fn entry(&self) -> Entry {
        fallback_entry(Schema::entry(&*self.wrapped), &self.fallback)
    }
}

/// Async form of [`FallbackSchema`]
#[derive(Debug, Clone)]
pub struct FallbackSchemaAsync {
    wrapped: Arc<dyn SchemaAsync>,
    fallback: DefaultValue,
}

impl Describe for FallbackSchemaAsync {
    fn kind(&self) -> Kind {
        self.wrapped.kind()
    }

    fn type_tag(&self) -> &'static str {
        self.wrapped.type_tag()
    }

    fn reference(&self) -> Reference {
        self.wrapped.reference()
    }

    fn expects(&self) -> Option<String> {
        self.wrapped.expects()
    }

    fn message(&self) -> Option<&Message> {
        self.wrapped.message()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl SchemaAsync for FallbackSchemaAsync {
    async fn run_async(&self, input: Value, config: &Config) -> Dataset {
        settle_fallback(self.wrapped.run_async(input, config).await, &self.fallback)
    }

    fn entry(&self) -> Entry {
        fallback_entry(SchemaAsync::entry(&*self.wrapped), &self.fallback)
    }
}

/// Creates a schema that yields `value` whenever `wrapped` fails
#[must_use]
pub fn fallback(wrapped: impl Schema + 'static, value: impl Into<Value>) -> FallbackSchema {
    fallback_with(wrapped, DefaultValue::literal(value))
}

/// Creates a fallback schema with a literal or computed fallback
#[must_use]
pub fn fallback_with(wrapped: impl Schema + 'static, fallback: DefaultValue) -> FallbackSchema {
    FallbackSchema {
        wrapped: Arc::new(wrapped),
        fallback,
    }
}

/// Creates an async schema that yields `fallback` whenever `wrapped` fails
#[must_use]
pub fn fallback_async(
    wrapped: impl SchemaAsync + 'static,
    fallback: DefaultValue,
) -> FallbackSchemaAsync {
    FallbackSchemaAsync {
        wrapped: Arc::new(wrapped),
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{number, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_optional_delegates_present_values() {
        let schema = optional(string());
        assert!(schema.run(json!("a"), &Config::default()).is_success());
        assert!(!schema.run(json!(null), &Config::default()).typed);
        assert_eq!(schema.expects().as_deref(), Some("(string | undefined)"));
    }

    #[test]
    fn test_nullable_accepts_null() {
        let dataset = nullable(string()).run(json!(null), &Config::default());
        assert!(dataset.is_success());
        assert_eq!(dataset.value, json!(null));
        assert!(matches!(Schema::entry(&nullable(string())), Entry::Required));
    }

    #[test]
    fn test_nullable_default_replaces_null() {
        let schema = nullable(string()).with_default(DefaultValue::literal("none"));
        assert_eq!(schema.run(json!(null), &Config::default()).value, json!("none"));

        let invalid = nullable(string()).with_default(DefaultValue::literal(3));
        assert!(!invalid.run(json!(null), &Config::default()).typed);
    }

    #[test]
    fn test_nullish_in_object() {
        let schema = object().with_entry("note", nullish(string()));
        assert_eq!(
            schema.run(json!({"note": null}), &Config::default()).value,
            json!({"note": null})
        );
        assert_eq!(schema.run(json!({}), &Config::default()).value, json!({}));
        assert_eq!(
            nullish(number()).expects().as_deref(),
            Some("(number | null | undefined)")
        );
    }

    #[test]
    fn test_fallback_suppresses_issues() {
        let schema = fallback(number(), 0);
        let dataset = schema.run(json!("x"), &Config::default());

        assert!(dataset.is_success());
        assert_eq!(dataset.value, json!(0));
        assert_eq!(schema.run(json!(5), &Config::default()).value, json!(5));
        assert_eq!(schema.type_tag(), "number");
    }

    #[test]
    fn test_fallback_entry() {
        assert!(matches!(Schema::entry(&fallback(number(), 0)), Entry::Fallback(_)));
        assert!(matches!(
            Schema::entry(&fallback(optional(number()), 0)),
            Entry::Fallback(_)
        ));
        assert!(matches!(
            Schema::entry(&fallback(optional_with_default(number(), 1), 0)),
            Entry::Optional { default: Some(_) }
        ));
    }

    #[test]
    fn test_fallback_over_optional_fills_absent_key() {
        let schema = object().with_entry("n", fallback(optional(number()), 0));
        let dataset = schema.run(json!({}), &Config::default());

        assert!(dataset.is_success());
        assert_eq!(dataset.value, json!({"n": 0}));
    }

    #[test]
    fn test_computed_fallback() {
        let schema = fallback_with(string(), DefaultValue::computed(|| json!("generated")));
        assert_eq!(schema.run(json!(1), &Config::default()).value, json!("generated"));
    }

    #[tokio::test]
    async fn test_async_wrappers_match_sync_forms() {
        let config = Config::default();
        for input in [json!(null), json!("a"), json!(1)] {
            assert_eq!(
                nullish_async(string()).run_async(input.clone(), &config).await,
                nullish(string()).run(input.clone(), &config)
            );
            assert_eq!(
                fallback_async(string(), DefaultValue::literal("z"))
                    .run_async(input.clone(), &config)
                    .await,
                fallback(string(), "z").run(input, &config)
            );
        }
        assert!(optional_async(string()).is_async());
    }
}
