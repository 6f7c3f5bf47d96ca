//! # Shapeguard Std
//!
//! The schema and action catalog built on `shapeguard-core`.
//!
//! Schemas check the shape of a value: primitives and literals, objects,
//! arrays, tuples, records, unions, and the `optional` / `nullable` /
//! `nullish` / `fallback` wrappers. Actions refine or transform a value that
//! already has the right shape and are chained behind a schema with
//! [`pipe`].
//!
//! Every composite comes in a sync form and an `_async` form. Async forms
//! accept sync children unchanged and await their children one at a time in
//! declaration order, so both forms report identical issues.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use shapeguard_core::{Config, dot_path, execute};
//! use shapeguard_std::actions::{email, min_length};
//! use shapeguard_std::pipe;
//! use shapeguard_std::schemas::{object, string};
//!
//! let signup = object()
//!     .with_entry("name", pipe(string()).with_action(min_length(2)))
//!     .with_entry("email", pipe(string()).with_action(email()));
//!
//! let dataset = execute(&signup, json!({"name": "A", "email": "a@b.io"}), &Config::default());
//! assert!(dataset.typed);
//! assert_eq!(dataset.issues.len(), 1);
//! assert_eq!(dot_path(&dataset.issues[0]).as_deref(), Some("name"));
//! ```

#![warn(missing_docs)]
#![warn(unused)]
#![warn(clippy::pedantic)]

pub mod actions;
pub mod schemas;

use shapeguard_core::{Schema, SchemaAsync, SchemaWithPipe, SchemaWithPipeAsync};

/// Attaches an empty pipe to `schema`; actions are added with `with_action`
#[must_use]
pub fn pipe(schema: impl Schema + 'static) -> SchemaWithPipe {
    SchemaWithPipe::new(schema)
}

/// Attaches an empty async pipe to `schema`
#[must_use]
pub fn pipe_async(schema: impl SchemaAsync + 'static) -> SchemaWithPipeAsync {
    SchemaWithPipeAsync::new(schema)
}
