//! Leaf schemas that check the shape of a single value.

use serde_json::Value;
use shapeguard_core::{
    Config, Dataset, Describe, IssueDetails, Kind, Message, Schema, add_issue, describe_received,
};

/// JSON type accepted by a [`PrimitiveSchema`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Any string
    String,
    /// Any number
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

impl Primitive {
    fn tag(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
        }
    }
}

/// Schema accepting one JSON primitive type
#[derive(Debug, Clone)]
pub struct PrimitiveSchema {
    primitive: Primitive,
    message: Option<Message>,
}

impl PrimitiveSchema {
    /// Creates a schema for `primitive`
    #[must_use]
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            message: None,
        }
    }

    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for PrimitiveSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        self.primitive.tag()
    }

    fn expects(&self) -> Option<String> {
        Some(self.primitive.tag().to_string())
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for PrimitiveSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let mut dataset = Dataset::unknown(input);
        if self.primitive.accepts(&dataset.value) {
            dataset.typed = true;
        } else {
            add_issue(self, "type", &mut dataset, config, IssueDetails::new());
        }
        dataset
    }
}

/// Creates a string schema
#[must_use]
pub fn string() -> PrimitiveSchema {
    PrimitiveSchema::new(Primitive::String)
}

/// Creates a number schema
#[must_use]
pub fn number() -> PrimitiveSchema {
    PrimitiveSchema::new(Primitive::Number)
}

/// Creates a boolean schema
#[must_use]
pub fn boolean() -> PrimitiveSchema {
    PrimitiveSchema::new(Primitive::Boolean)
}

/// Creates a null schema
#[must_use]
pub fn null() -> PrimitiveSchema {
    PrimitiveSchema::new(Primitive::Null)
}

/// Schema accepting exactly one value
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    literal: Value,
    message: Option<Message>,
}

impl LiteralSchema {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for LiteralSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "literal"
    }

    fn expects(&self) -> Option<String> {
        Some(describe_received(Some(&self.literal)))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Schema for LiteralSchema {
    fn run(&self, input: Value, config: &Config) -> Dataset {
        let mut dataset = Dataset::unknown(input);
        if dataset.value == self.literal {
            dataset.typed = true;
        } else {
            add_issue(self, "type", &mut dataset, config, IssueDetails::new());
        }
        dataset
    }
}

/// Creates a schema accepting only `literal`
#[must_use]
pub fn literal(literal: impl Into<Value>) -> LiteralSchema {
    LiteralSchema {
        literal: literal.into(),
        message: None,
    }
}

/// Schema accepting any value
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownSchema;

impl Describe for UnknownSchema {
    fn kind(&self) -> Kind {
        Kind::Schema
    }

    fn type_tag(&self) -> &'static str {
        "unknown"
    }

    fn expects(&self) -> Option<String> {
        Some("unknown".to_string())
    }
}

impl Schema for UnknownSchema {
    fn run(&self, input: Value, _config: &Config) -> Dataset {
        Dataset::typed(input)
    }
}

/// Creates a schema accepting any value
#[must_use]
pub fn unknown() -> UnknownSchema {
    UnknownSchema
}
