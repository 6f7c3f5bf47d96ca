//! Logging configuration
//!
//! Validation never reports failures through logs; issues are data. The
//! events below only trace how a run progressed:
//!
//! | Target | Level | Event |
//! |---|---|---|
//! | `shapeguard_core::execute` | `debug` | schema executed, with `typed` and `issues` counts |
//! | `shapeguard_core::pipe` | `debug` | pipe aborted after its first issue, with the `skipped` count |
//! | `shapeguard_core::pipe` | `trace` | pipe skipped because the schema left the dataset untyped |
//! | `shapeguard_std::schemas::union` | `trace` | index of the union option that matched |
//! | `shapeguard_std::schemas::wrappers` | `trace` | fallback replaced a failed value |

use tracing_subscriber::{EnvFilter, fmt};

/// Crates whose events [`init_logging`] enables
pub const TARGETS: [&str; 2] = ["shapeguard_core", "shapeguard_std"];

/// Builds a filter enabling shapeguard's events at `level`.
///
/// Events of other crates stay at the subscriber's default (`error`).
#[must_use]
pub fn filter_for(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs a `fmt` subscriber showing shapeguard's events at `level`.
///
/// `RUST_LOG` takes precedence over `level`. Calling it again once a global
/// subscriber is installed is a no-op.
pub fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(level)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_filter_scopes_to_shapeguard_crates() {
        assert_eq!(filter_for("trace"), "shapeguard_core=trace,shapeguard_std=trace");
        assert!(EnvFilter::try_new(filter_for("debug")).is_ok());
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("debug");
        init_logging("trace");

        let dataset = execute(&union!(number(), string()), json!("a"), &Config::default());
        assert!(dataset.is_success());
    }
}
