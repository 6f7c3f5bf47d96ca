//! Execution configuration.
//!
//! A [`Config`] is shared by every step of one run. It is only constructed
//! through [`ConfigBuilder`], which rejects conflicting policies.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{ConfigError, CoreResult};
use crate::message::Message;

static GLOBAL_CONFIG: Lazy<RwLock<Option<Config>>> = Lazy::new(|| RwLock::new(None));

/// Configuration shared by every step of one execution
#[derive(Debug, Clone, Default)]
pub struct Config {
    lang: Option<String>,
    message: Option<Message>,
    abort_early: Option<bool>,
    abort_pipe_early: Option<bool>,
}

impl Config {
    /// Creates a configuration builder
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Locale tag used for message selection
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Message used when no schema or action message applies
    #[must_use]
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Whether composite schemas stop at the first failing child
    #[must_use]
    pub fn abort_early(&self) -> bool {
        self.abort_early.unwrap_or(false)
    }

    /// Whether pipes stop at the first issue
    #[must_use]
    pub fn aborts_pipe(&self) -> bool {
        self.abort_early() || self.abort_pipe_early.unwrap_or(false)
    }

    /// The abort-early setting as configured, `None` when unset
    #[must_use]
    pub fn abort_early_setting(&self) -> Option<bool> {
        self.abort_early
    }

    /// The abort-pipe-early setting as configured, `None` when unset
    #[must_use]
    pub fn abort_pipe_early_setting(&self) -> Option<bool> {
        self.abort_pipe_early
    }

    /// Fills every unset field from `fallback`
    #[must_use]
    pub fn merged(&self, fallback: Option<&Config>) -> Config {
        let Some(fallback) = fallback else {
            return self.clone();
        };
        Config {
            lang: self.lang.clone().or_else(|| fallback.lang.clone()),
            message: self.message.clone().or_else(|| fallback.message.clone()),
            abort_early: self.abort_early.or(fallback.abort_early),
            abort_pipe_early: self.abort_pipe_early.or(fallback.abort_pipe_early),
        }
    }

    /// Fills every unset field from the global configuration
    #[must_use]
    pub fn merged_with_global(&self) -> Config {
        let global = GLOBAL_CONFIG.read();
        self.merged(global.as_ref())
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    lang: Option<String>,
    message: Option<Message>,
    abort_early: Option<bool>,
    abort_pipe_early: Option<bool>,
}

impl ConfigBuilder {
    /// Sets the locale tag
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the configuration-level message
    #[must_use]
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the abort-early policy
    #[must_use]
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = Some(abort_early);
        self
    }

    /// Sets the abort-pipe-early policy
    #[must_use]
    pub fn abort_pipe_early(mut self, abort_pipe_early: bool) -> Self {
        self.abort_pipe_early = Some(abort_pipe_early);
        self
    }

    /// Validates the settings and builds the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingAbortPolicy` when abort-early is
    /// enabled while abort-pipe-early is explicitly disabled, and
    /// `ConfigError::InvalidLang` for a malformed lang tag.
    pub fn build(self) -> CoreResult<Config> {
        if self.abort_early == Some(true) && self.abort_pipe_early == Some(false) {
            return Err(ConfigError::ConflictingAbortPolicy);
        }
        if let Some(lang) = &self.lang {
            validate_lang(lang)?;
        }
        Ok(Config {
            lang: self.lang,
            message: self.message,
            abort_early: self.abort_early,
            abort_pipe_early: self.abort_pipe_early,
        })
    }
}

fn validate_lang(lang: &str) -> CoreResult {
    let valid = !lang.is_empty()
        && !lang.starts_with('-')
        && !lang.ends_with('-')
        && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidLang {
            lang: lang.to_string(),
        })
    }
}

/// Installs the global configuration used to fill unset fields
pub fn set_global_config(config: Config) {
    *GLOBAL_CONFIG.write() = Some(config);
}

/// Returns a copy of the global configuration
#[must_use]
pub fn global_config() -> Option<Config> {
    GLOBAL_CONFIG.read().clone()
}

/// Removes the global configuration
pub fn delete_global_config() {
    *GLOBAL_CONFIG.write() = None;
}
