//! Execution entry points.

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::schema::{Schema, SchemaAsync};

/// Executes `schema` against `input`.
///
/// Unset configuration fields are filled from the global configuration.
pub fn execute<S: Schema + ?Sized>(schema: &S, input: Value, config: &Config) -> Dataset {
    let config = config.merged_with_global();
    let dataset = schema.run(input, &config);
    debug!(
        schema = schema.type_tag(),
        typed = dataset.typed,
        issues = dataset.issues.len(),
        "schema executed"
    );
    dataset
}

/// Awaitable counterpart of [`execute`].
pub async fn execute_async<S: SchemaAsync + ?Sized>(
    schema: &S,
    input: Value,
    config: &Config,
) -> Dataset {
    let config = config.merged_with_global();
    let dataset = schema.run_async(input, &config).await;
    debug!(
        schema = schema.type_tag(),
        typed = dataset.typed,
        issues = dataset.issues.len(),
        "schema executed"
    );
    dataset
}
