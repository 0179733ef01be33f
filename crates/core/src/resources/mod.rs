//! Operation registries, one module per resource family
//!
//! [`execute`] matches the validated (resource, operation) pair exhaustively;
//! each resource module then reads its parameters, validates them, and sends
//! the resulting request(s) through the executor.

pub mod content;
pub mod content_folder;
pub mod playlist;
pub mod process;
pub mod slide;

use obscreen_domain::{ObscreenError, ResourceOperation, Result};
use serde_json::{json, Value};

use crate::params::ParameterBag;
use crate::ports::ApiExecutor;

/// Run one operation for one item. Arrays in the result are flattened by the caller.
pub async fn execute(
    operation: ResourceOperation,
    executor: &dyn ApiExecutor,
    params: &ParameterBag<'_>,
) -> Result<Value> {
    match operation {
        ResourceOperation::Content(op) => content::execute(op, executor, params).await,
        ResourceOperation::ContentFolder(op) => content_folder::execute(op, executor, params).await,
        ResourceOperation::Playlist(op) => playlist::execute(op, executor, params).await,
        ResourceOperation::Slide(op) => slide::execute(op, executor, params).await,
        ResourceOperation::Process(op) => process::execute(op, executor, params).await,
    }
}

/// Result emitted by every delete operation.
pub(crate) fn deleted() -> Value {
    json!({ "deleted": true })
}

/// `base` (ending in `/`) followed by the percent-encoded id.
pub(crate) fn entity_path(base: &str, id: &str) -> String {
    format!("{base}{}", urlencoding::encode(id))
}

/// Numeric ids go out as JSON numbers, anything else as a string.
pub(crate) fn id_value(id: &str) -> Value {
    id.parse::<i64>().map_or_else(|_| Value::String(id.to_string()), Value::from)
}

pub(crate) fn integer_id(field: &str, id: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ObscreenError::validation(field, format!("\"{id}\" is not a numeric id")))
}

/// Integer ids from a fixed collection parameter.
///
/// Accepts `{<list_key>: [{<item_key>: locator}, ..]}` as the host's
/// collection widget sends it, or a plain array of locators.
pub(crate) fn collect_entity_ids(
    params: &ParameterBag<'_>,
    collection: &str,
    list_key: &str,
    item_key: &str,
) -> Result<Vec<i64>> {
    let entries: Vec<&Value> = match params.raw(collection) {
        None => Vec::new(),
        Some(Value::Array(values)) => values.iter().collect(),
        Some(Value::Object(_)) => {
            let Some(inner) = params.object(collection)? else {
                return Ok(Vec::new());
            };
            inner
                .array(list_key)?
                .iter()
                .map(|entry| entry.get(item_key).unwrap_or(entry))
                .collect()
        }
        Some(_) => {
            return Err(ObscreenError::validation(
                collection,
                format!("expected an object with `{list_key}` or an array"),
            ))
        }
    };

    if entries.is_empty() {
        return Err(ObscreenError::validation(collection, "at least one id is required"));
    }

    entries
        .into_iter()
        .map(|entry| {
            let id = crate::locator::resolve_locator_id(entry)?;
            integer_id(collection, &id)
        })
        .collect()
}
