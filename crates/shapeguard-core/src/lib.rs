//! # Shapeguard Core
//!
//! Execution machinery shared by every Shapeguard schema and action.
//!
//! This crate defines the data threaded through a validation run and the
//! contracts that concrete schemas and actions implement. It contains no
//! validation rules of its own.
//!
//! ## Architecture
//!
//! The core is organized in small layers, leaves first:
//!
//! - `issue`: the failure record, its kinds and issue construction
//! - `path`: location segments and path extension for nested failures
//! - `dataset`: the `{typed, value, issues}` carrier and the final outcome
//! - `message`: literal or computed messages and the message registries
//! - `config`: per-run configuration and the global configuration
//! - `action` / `schema`: sync and async execution contracts
//! - `pipe`: the pipe composer and schemas with an attached pipe
//! - `execute`: execution entry points
//!
//! ## Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use shapeguard_core::{Config, Dataset, Describe, Kind, Schema, add_issue, execute};
//! use shapeguard_core::issue::IssueDetails;
//!
//! #[derive(Debug)]
//! struct Text;
//!
//! impl Describe for Text {
//!     fn kind(&self) -> Kind {
//!         Kind::Schema
//!     }
//!
//!     fn type_tag(&self) -> &'static str {
//!         "text"
//!     }
//!
//!     fn expects(&self) -> Option<String> {
//!         Some("string".to_string())
//!     }
//! }
//!
//! impl Schema for Text {
//!     fn run(&self, input: Value, config: &Config) -> Dataset {
//!         let mut dataset = Dataset::unknown(input);
//!         if dataset.value.is_string() {
//!             dataset.typed = true;
//!         } else {
//!             add_issue(self, "type", &mut dataset, config, IssueDetails::new());
//!         }
//!         dataset
//!     }
//! }
//!
//! let dataset = execute(&Text, json!(42), &Config::default());
//! assert!(!dataset.typed);
//! assert_eq!(dataset.issues[0].message, "Invalid type: Expected string but received 42");
//! ```

#![warn(missing_docs)]
#![warn(unused)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod config;
pub mod dataset;
pub mod error;
pub mod execute;
pub mod issue;
pub mod message;
pub mod path;
pub mod pipe;
pub mod schema;
#[cfg(feature = "testing")]
pub mod testing;

// Re-exports for common use
pub use action::{Action, ActionAsync};
pub use config::{
    Config, ConfigBuilder, delete_global_config, global_config, set_global_config,
};
pub use dataset::{Dataset, Outcome};
pub use error::{ConfigError, CoreResult};
pub use execute::{execute, execute_async};
pub use issue::{
    FlatErrors, Issue, IssueDetails, Kind, add_issue, describe_received, dot_path, flatten,
};
pub use message::Message;
pub use path::{PathItem, PathItemType, PathOrigin, extend_path, prepend_path};
pub use pipe::{SchemaWithPipe, SchemaWithPipeAsync, run_pipe, run_pipe_async};
pub use schema::{DefaultValue, Describe, Entry, Reference, Schema, SchemaAsync};

/// The value type every schema accepts and every dataset carries.
pub use serde_json::Value;

// Version
/// Shapeguard Core version
pub const VERSION: &str = "0.1.0";
