//! Port interfaces for talking to an Obscreen instance
//!
//! Core never performs HTTP itself. Infrastructure implements these traits.

use async_trait::async_trait;
use obscreen_domain::{ApiRequest, Result};
use serde_json::Value;

/// Sends one [`ApiRequest`] and returns the decoded response body
#[async_trait]
pub trait ApiExecutor: Send + Sync {
    /// Execute the request.
    ///
    /// Non-2xx responses fail with `ObscreenError::Api` carrying the status;
    /// failures before a response fail with `ObscreenError::Transport`.
    async fn execute(&self, request: ApiRequest) -> Result<Value>;
}

#[async_trait]
impl<T: ApiExecutor + ?Sized> ApiExecutor for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        (**self).execute(request).await
    }
}
