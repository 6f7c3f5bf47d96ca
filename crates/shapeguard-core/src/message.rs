//! Issue messages and message registries.
//!
//! A [`Message`] is either a literal or a function of the issue being built.
//! Messages are resolved only when an issue is constructed.
//!
//! Registries hold process-wide messages keyed by lang. Resolution order for
//! a new issue is: the source's own message, the specific message registered
//! for the source's reference, the schema message (schema issues only), the
//! configuration message, the global message, and finally the default
//! template built by [`crate::add_issue`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::config::Config;
use crate::issue::{Issue, Kind};
use crate::schema::{Describe, Reference};

type LangKey = Option<String>;

static GLOBAL_MESSAGES: Lazy<RwLock<HashMap<LangKey, Message>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static SCHEMA_MESSAGES: Lazy<RwLock<HashMap<LangKey, Message>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static SPECIFIC_MESSAGES: Lazy<RwLock<HashMap<(Reference, LangKey), Message>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Literal or computed issue message
#[derive(Clone)]
pub enum Message {
    /// Fixed text
    Literal(String),
    /// Text computed from the issue under construction
    Computed(Arc<dyn Fn(&Issue) -> String + Send + Sync>),
}

impl Message {
    /// Creates a computed message
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Issue) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Renders the message for `issue`
    #[must_use]
    pub fn render(&self, issue: &Issue) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Computed(f) => f(issue),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

fn lang_key(lang: Option<&str>) -> LangKey {
    lang.map(str::to_string)
}

/// Sets the message used by every issue of the given lang
pub fn set_global_message(message: impl Into<Message>, lang: Option<&str>) {
    GLOBAL_MESSAGES.write().insert(lang_key(lang), message.into());
}

/// Returns the global message of the given lang
#[must_use]
pub fn global_message(lang: Option<&str>) -> Option<Message> {
    GLOBAL_MESSAGES.read().get(&lang_key(lang)).cloned()
}

/// Removes the global message of the given lang
pub fn delete_global_message(lang: Option<&str>) {
    GLOBAL_MESSAGES.write().remove(&lang_key(lang));
}

/// Sets the message used by every schema issue of the given lang
pub fn set_schema_message(message: impl Into<Message>, lang: Option<&str>) {
    SCHEMA_MESSAGES.write().insert(lang_key(lang), message.into());
}

/// Returns the schema message of the given lang
#[must_use]
pub fn schema_message(lang: Option<&str>) -> Option<Message> {
    SCHEMA_MESSAGES.read().get(&lang_key(lang)).cloned()
}

/// Removes the schema message of the given lang
pub fn delete_schema_message(lang: Option<&str>) {
    SCHEMA_MESSAGES.write().remove(&lang_key(lang));
}

/// Sets the message used by issues of one schema or action factory
pub fn set_specific_message(reference: Reference, message: impl Into<Message>, lang: Option<&str>) {
    SPECIFIC_MESSAGES
        .write()
        .insert((reference, lang_key(lang)), message.into());
}

/// Returns the specific message of a factory for the given lang
#[must_use]
pub fn specific_message(reference: Reference, lang: Option<&str>) -> Option<Message> {
    SPECIFIC_MESSAGES
        .read()
        .get(&(reference, lang_key(lang)))
        .cloned()
}

/// Removes the specific message of a factory for the given lang
pub fn delete_specific_message(reference: Reference, lang: Option<&str>) {
    SPECIFIC_MESSAGES
        .write()
        .remove(&(reference, lang_key(lang)));
}

/// Selects the message for a new issue of `source`, if any applies.
pub(crate) fn resolve<D: Describe + ?Sized>(source: &D, config: &Config) -> Option<Message> {
    let lang = config.lang();
    source
        .message()
        .cloned()
        .or_else(|| specific_message(source.reference(), lang))
        .or_else(|| {
            if source.kind() == Kind::Schema {
                schema_message(lang)
            } else {
                None
            }
        })
        .or_else(|| config.message().cloned())
        .or_else(|| global_message(lang))
}
