//! Per-item dispatch
//!
//! The resource is fixed for the whole batch; each item names its own
//! operation. Items run strictly one after another. A failing item either
//! aborts the batch with an [`ItemError`] or, in continue-on-fail mode,
//! becomes an error record at its position.

use std::sync::Arc;

use obscreen_domain::constants::DEFAULT_OPERATION;
use obscreen_domain::{
    ErrorPayload, InputItem, ObscreenError, OutputItem, Resource, ResourceOperation, Result,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::params::ParameterBag;
use crate::ports::ApiExecutor;
use crate::resources;

/// A failure annotated with the item it happened on
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source} (item {item_index})")]
pub struct ItemError {
    pub item_index: usize,
    pub resource: String,
    pub operation: String,
    /// `Check your credentials and parameters. ...`
    pub description: String,
    /// Status-derived hint, when one applies.
    pub context_message: Option<String>,
    #[source]
    pub source: ObscreenError,
}

impl ItemError {
    pub fn new(
        item_index: usize,
        resource: &str,
        operation: &str,
        source: ObscreenError,
    ) -> Self {
        Self {
            item_index,
            resource: resource.to_string(),
            operation: operation.to_string(),
            description: format!(
                "Check your credentials and parameters. The \"{resource}\" {} operation failed.",
                operation.to_lowercase()
            ),
            context_message: source.hint().map(|hint| hint.describe(resource)),
            source,
        }
    }
}

/// Error record emitted in continue-on-fail mode.
fn error_payload(error: &ObscreenError) -> ErrorPayload {
    ErrorPayload {
        message: error.to_string(),
        kind: error.category().as_str().to_string(),
        status: error.status(),
    }
}

/// Runs a batch of items against one resource
pub struct Dispatcher {
    executor: Arc<dyn ApiExecutor>,
    continue_on_fail: bool,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn ApiExecutor>) -> Self {
        Self { executor, continue_on_fail: false }
    }

    /// Record per-item failures instead of aborting the batch.
    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    pub fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    /// Process every item in order.
    ///
    /// # Errors
    ///
    /// The first failing item's [`ItemError`], unless continue-on-fail is on.
    #[instrument(skip(self, items), fields(resource = %resource, items = items.len()))]
    pub async fn run(
        &self,
        resource: Resource,
        items: &[InputItem],
    ) -> std::result::Result<Vec<OutputItem>, ItemError> {
        let mut output = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let operation = operation_tag(item);

            match self.run_item(resource, &operation, item).await {
                Ok(value) => {
                    debug!(item_index = index, operation = %operation, "Item succeeded");
                    push_records(&mut output, index, value);
                }
                Err(err) => {
                    warn!(
                        item_index = index,
                        operation = %operation,
                        error_kind = err.category().as_str(),
                        error = %err,
                        "Item failed"
                    );
                    if !self.continue_on_fail {
                        return Err(ItemError::new(index, resource.as_str(), &operation, err));
                    }
                    output.push(OutputItem::error(index, error_payload(&err)));
                }
            }
        }

        info!(records = output.len(), "Batch finished");
        Ok(output)
    }

    /// Run a single item without output shaping.
    pub async fn run_item(
        &self,
        resource: Resource,
        operation: &str,
        item: &InputItem,
    ) -> Result<Value> {
        let operation = ResourceOperation::parse(resource, operation)?;
        let params = ParameterBag::from_item(item);
        resources::execute(operation, self.executor.as_ref(), &params).await
    }
}

/// Operation named by the item, falling back to the default.
fn operation_tag(item: &InputItem) -> String {
    item.json
        .get("operation")
        .and_then(Value::as_str)
        .filter(|op| !op.is_empty())
        .unwrap_or(DEFAULT_OPERATION)
        .to_string()
}

/// Arrays expand to one record per element; anything else is one record.
fn push_records(output: &mut Vec<OutputItem>, index: usize, value: Value) {
    match value {
        Value::Array(values) => {
            output.extend(values.into_iter().map(|value| OutputItem::data(index, value)));
        }
        value => output.push(OutputItem::data(index, value)),
    }
}
