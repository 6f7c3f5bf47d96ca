//! Pattern checks on strings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use shapeguard_core::{Action, Config, Dataset, Describe, IssueDetails, Kind, Message};

use super::validate;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\w+-]+(?:\.[\w+-]+)*@[\da-z]+(?:[.-][\da-z]+)*\.[a-z]{2,}$").unwrap()
});

fn matches(re: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| re.is_match(s))
}

/// Validates a string against a regular expression
#[derive(Debug, Clone)]
pub struct RegexAction {
    pattern: Regex,
    message: Option<Message>,
}

impl RegexAction {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for RegexAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        "regex"
    }

    fn expects(&self) -> Option<String> {
        Some(format!("/{}/", self.pattern.as_str()))
    }

    fn requirement(&self) -> Option<Value> {
        Some(Value::String(self.pattern.as_str().to_string()))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for RegexAction {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "format", dataset, config, |value| {
            (!matches(&self.pattern, value)).then(IssueDetails::new)
        })
    }
}

/// Requires a string matching `pattern`
#[must_use]
pub fn regex(pattern: Regex) -> RegexAction {
    RegexAction {
        pattern,
        message: None,
    }
}

/// Validates that a string is an email address
#[derive(Debug, Clone, Default)]
pub struct EmailAction {
    message: Option<Message>,
}

impl EmailAction {
    /// Overrides the issue message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for EmailAction {
    fn kind(&self) -> Kind {
        Kind::Validation
    }

    fn type_tag(&self) -> &'static str {
        "email"
    }

    fn requirement(&self) -> Option<Value> {
        Some(Value::String(EMAIL_REGEX.as_str().to_string()))
    }

    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Action for EmailAction {
    fn run(&self, dataset: Dataset, config: &Config) -> Dataset {
        validate(self, "email", dataset, config, |value| {
            (!matches(&EMAIL_REGEX, value)).then(IssueDetails::new)
        })
    }
}

/// Requires an email address
#[must_use]
pub fn email() -> EmailAction {
    EmailAction::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_regex() {
        let action = regex(Regex::new("^[a-z]+$").unwrap());
        assert!(action.run(Dataset::typed(json!("abc")), &Config::default()).is_success());

        let dataset = action.run(Dataset::typed(json!("ABC")), &Config::default());
        assert_eq!(
            dataset.issues[0].message,
            "Invalid format: Expected /^[a-z]+$/ but received \"ABC\""
        );
    }

    #[rstest]
    #[case("jane@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("no-at-sign.example.com", false)]
    #[case("jane@localhost", false)]
    fn test_email(#[case] input: &str, #[case] ok: bool) {
        let dataset = email().run(Dataset::typed(json!(input)), &Config::default());
        assert_eq!(dataset.is_success(), ok);
    }

    #[test]
    fn test_email_message_without_expectation() {
        let dataset = email().run(Dataset::typed(json!("x")), &Config::default());
        assert_eq!(dataset.issues[0].message, "Invalid email: Received \"x\"");
    }
}
