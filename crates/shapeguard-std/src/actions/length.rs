//! Length constraints on strings and arrays.

use serde_json::Value;
use shapeguard_core::{Action, Config, Dataset, Describe, IssueDetails, Kind, Message};

use super::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Min,
    Max,
    Exact,
    NonEmpty,
}

/// Number of characters of a string or items of an array
fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Validates the length of a string or an array
#[derive(Debug, Clone)]
pub struct LengthAction {
    rule: Rule,
    requirement: usize,
    message: Option<Message>,
}

impl LengthAction {
    fn new(rule: Rule, requirement: usize) -> Self {
        Self {
            rule,
            requirement,
            message: None,
        }
    }

    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn accepts(&self, length: usize) -> bool {
        match self.rule {
            Rule::Min => length >= self.requirement,
            Rule::Max => length <= self.requirement,
            Rule::Exact => length == self.requirement,
            Rule::NonEmpty => length > 0,
        }
    }
}

impl Describe for LengthAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        match self.rule {
            Rule::Min => "min_length",
            Rule::Max => "max_length",
            Rule::Exact => "length",
            Rule::NonEmpty => "non_empty",
        }
    }

    fn expects(&self) -> Option<String> {
        Some(match self.rule {
            Rule::Min => format!(">={}", self.requirement),
            Rule::Max => format!("<={}", self.requirement),
            Rule::Exact => self.requirement.to_string(),
            Rule::NonEmpty => "!0".to_string(),
        })
    }

    fn requirement(&self) -> Option<Value> {
        match self.rule {
            Rule::NonEmpty => None,
            _ => Some(Value::from(self.requirement)),
        }
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for LengthAction {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "length", dataset, config, |value| match measure(value) {
            Some(length) if self.accepts(length) => None,
            Some(length) => Some(IssueDetails::new().received(length.to_string())),
            None => Some(IssueDetails::new()),
        })
    }
}

/// Requires at least `requirement` characters or items
#[must_use]
pub fn min_length(requirement: usize) -> LengthAction {
    LengthAction::new(Rule::Min, requirement)
}

/// Allows at most `requirement` characters or items
#[must_use]
pub fn max_length(requirement: usize) -> LengthAction {
    LengthAction::new(Rule::Max, requirement)
}

/// Requires exactly `requirement` characters or items
#[must_use]
pub fn length(requirement: usize) -> LengthAction {
    LengthAction::new(Rule::Exact, requirement)
}

/// Rejects empty strings and arrays
#[must_use]
pub fn non_empty() -> LengthAction {
    LengthAction::new(Rule::NonEmpty, 0)
}
