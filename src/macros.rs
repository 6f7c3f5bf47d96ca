//! Declarative macros for schema construction
//!
//! These macros expand to the builder calls of the catalog and accept any
//! expression that evaluates to a schema or an action.

/// Creates an object schema from `key => schema` pairs
///
/// Unknown keys are stripped. Prefix the pairs with `loose;` or `strict;` to
/// keep or reject them instead.
#[macro_export]
macro_rules! object {
    (loose; $($key:expr => $schema:expr),* $(,)?) => {
        $crate::schemas::loose_object()$(.with_entry($key, $schema))*
    };
    (strict; $($key:expr => $schema:expr),* $(,)?) => {
        $crate::schemas::strict_object()$(.with_entry($key, $schema))*
    };
    ($($key:expr => $schema:expr),* $(,)?) => {
        $crate::schemas::object()$(.with_entry($key, $schema))*
    };
}

/// Creates a tuple schema from positional schemas
#[macro_export]
macro_rules! tuple {
    ($($schema:expr),* $(,)?) => {
        $crate::schemas::tuple()$(.with_item($schema))*
    };
}

/// Creates a union schema from its options
#[macro_export]
macro_rules! union {
    ($($schema:expr),+ $(,)?) => {
        $crate::schemas::union()$(.with_option($schema))+
    };
}

/// Attaches a pipe of actions to a schema
#[macro_export]
macro_rules! pipe {
    ($schema:expr $(, $action:expr)* $(,)?) => {
        $crate::pipe($schema)$(.with_action($action))*
    };
}

/// Attaches a pipe of possibly async actions to a possibly async schema
#[macro_export]
macro_rules! pipe_async {
    ($schema:expr $(, $action:expr)* $(,)?) => {
        $crate::pipe_async($schema)$(.with_action($action))*
    };
}
