//! Numeric bounds.

use serde_json::Value;
use shapeguard_core::{Action, Config, Dataset, Describe, IssueDetails, Kind, Message};

use super::{number_value, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

/// Validates that a number lies on one side of a bound
#[derive(Debug, Clone)]
pub struct ValueAction {
    bound: Bound,
    requirement: f64,
    message: Option<Message>,
}

impl ValueAction {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for ValueAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        match self.bound {
            Bound::Min => "min_value",
            Bound::Max => "max_value",
        }
    }

    fn expects(&self) -> Option<String> {
        let op = match self.bound {
            Bound::Min => ">=",
            Bound::Max => "<=",
        };
        Some(format!("{op}{}", number_value(self.requirement)))
    }

    fn requirement(&self) -> Option<Value> {
        Some(number_value(self.requirement))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for ValueAction {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "value", dataset, config, |value| {
            let accepted = value.as_f64().is_some_and(|n| match self.bound {
                Bound::Min => n >= self.requirement,
                Bound::Max => n <= self.requirement,
            });
            (!accepted).then(IssueDetails::new)
        })
    }
}

/// Requires a number greater than or equal to `requirement`
#[must_use]
pub fn min_value(requirement: f64) -> ValueAction {
    ValueAction {
        bound: Bound::Min,
        requirement,
        message: None,
    }
}

/// Requires a number less than or equal to `requirement`
#[must_use]
pub fn max_value(requirement: f64) -> ValueAction {
    ValueAction {
        bound: Bound::Max,
        requirement,
        message: None,
    }
}

/// Validates that a number is a multiple of the requirement
#[derive(Debug, Clone)]
pub struct MultipleOfAction {
    requirement: f64,
    message: Option<Message>,
}

impl MultipleOfAction {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for MultipleOfAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        "multiple_of"
    }

    fn expects(&self) -> Option<String> {
        Some(format!("%{}", number_value(self.requirement)))
    }

    fn requirement(&self) -> Option<Value> {
        Some(number_value(self.requirement))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for MultipleOfAction {
    #[allow(clippy::float_cmp)]
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "multiple", dataset, config, |value| {
            let accepted = value.as_f64().is_some_and(|n| n % self.requirement == 0.0);
            (!accepted).then(IssueDetails::new)
        })
    }
}

/// Requires a number that is a multiple of `requirement`
#[must_use]
pub fn multiple_of(requirement: f64) -> MultipleOfAction {
    MultipleOfAction {
        requirement,
        message: None,
    }
}
