//! In-memory executor for exercising handlers without HTTP

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use obscreen_domain::{ApiRequest, Result};
use serde_json::{json, Value};

use crate::ports::ApiExecutor;

/// Records every request and replays scripted responses in order.
///
/// Once the script runs out every call answers `{}`.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    requests: Mutex<Vec<ApiRequest>>,
    script: Mutex<VecDeque<Result<Value>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body.
    pub fn respond(self, body: Value) -> Self {
        lock(&self.script).push_back(Ok(body));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: obscreen_domain::ObscreenError) -> Self {
        lock(&self.script).push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl ApiExecutor for RecordingExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        lock(&self.requests).push(request);
        lock(&self.script).pop_front().unwrap_or_else(|| Ok(json!({})))
    }
}
