//! # Shapeguard - Runtime Validation Pipelines for Rust
//!
//! Shapeguard validates untrusted JSON values against schemas composed at
//! runtime, then refines and transforms them through pipes of actions.
//! Failures are collected as structured issues instead of being raised.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use shapeguard::prelude::*;
//!
//! let user = object! {
//!     "name" => pipe!(string(), trim(), min_length(1)),
//!     "email" => pipe!(string(), email()),
//!     "tags" => optional(array(string())),
//! };
//!
//! let dataset = execute(&user, json!({"name": "  Ada ", "email": "ada@example.com"}), &Config::default());
//! assert!(dataset.is_success());
//! assert_eq!(dataset.value, json!({"name": "Ada", "email": "ada@example.com"}));
//! ```
//!
//! ## Crates
//!
//! - [`shapeguard_core`]: datasets, issues, paths, messages, configuration,
//!   the sync and async contracts, the pipe composer and entry points
//! - [`shapeguard_std`]: the schema and action catalog
//!
//! Both are re-exported here together with a [`prelude`], declarative
//! builder macros and [`logging::init_logging`].
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod logging;

// Prelude module for common imports
pub mod prelude;

// Re-export the member crates
pub use shapeguard_core::{
    action, config, dataset, error, issue, message, path, schema,
};
pub use shapeguard_std::{actions, pipe, pipe_async, schemas};

// Re-export commonly used types
pub use shapeguard_core::{
    Action, ActionAsync, Config, ConfigBuilder, ConfigError, CoreResult, Dataset, DefaultValue,
    Describe, Entry, FlatErrors, Issue, IssueDetails, Kind, Message, Outcome, PathItem,
    PathItemType, PathOrigin, Reference, Schema, SchemaAsync, SchemaWithPipe, SchemaWithPipeAsync,
    Value, add_issue, delete_global_config, dot_path, execute, execute_async, flatten,
    global_config, run_pipe, run_pipe_async, set_global_config,
};

/// Version of the shapeguard crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
