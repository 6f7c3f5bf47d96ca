//! Error types for programming errors.
//!
//! Validation failures are never errors; they are recorded as issues on the
//! dataset. The types here cover caller mistakes that must fail fast.

use thiserror::Error;

/// Result type for fallible core operations
pub type CoreResult<T = ()> = Result<T, ConfigError>;

/// Invalid configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Abort-early was requested while pipe abort was explicitly disabled
    #[error("abort_early implies abort_pipe_early; abort_pipe_early cannot be disabled")]
    ConflictingAbortPolicy,

    /// Lang tag is empty or contains invalid characters
    #[error("invalid lang tag '{lang}': expected ASCII letters, digits and '-'")]
    InvalidLang {
        /// The rejected tag
        lang: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_abort_policy_error() {
        let error = ConfigError::ConflictingAbortPolicy;
        assert!(error.to_string().contains("abort_pipe_early"));
    }

    #[test]
    fn test_invalid_lang_error() {
        let error = ConfigError::InvalidLang {
            lang: "e n".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid lang tag 'e n': expected ASCII letters, digits and '-'"
        );
    }
}
