//! Prelude module for common imports

// Re-export macros
pub use crate::{object, pipe, pipe_async, tuple, union};

// Execution
pub use shapeguard_core::{
    Config, Dataset, Issue, Outcome, Schema, SchemaAsync, dot_path, execute, execute_async, flatten,
};

// Contracts for custom schemas and actions
pub use shapeguard_core::{Action, ActionAsync, Describe, IssueDetails, Kind, Message, add_issue};

// Catalog
pub use shapeguard_std::actions::{
    check, check_async, email, length, max_length, max_value, min_length, min_value, multiple_of,
    non_empty, regex, to_lower_case, to_upper_case, transform, transform_async, trim,
};
pub use shapeguard_std::schemas::{
    array, array_async, boolean, fallback, literal, loose_object, loose_object_async, null,
    nullable, nullable_async, nullish, nullish_async, number, object, object_async, optional,
    optional_async, optional_with_default, record, record_async, strict_object,
    strict_object_async, string, tuple, tuple_async, union, union_async, unknown,
};
