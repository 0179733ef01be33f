//! API key resolution
//!
//! The instance authenticates every call with a static user API key sent as
//! `Authorization: Bearer <key>`. Keys are never logged.

use std::fmt;

use async_trait::async_trait;
use obscreen_domain::{ObscreenError, Result};

/// Trait for providing the bearer API key
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait ApiKeyProvider: Send + Sync {
    async fn api_key(&self) -> Result<String>;
}

/// Key fixed at construction time (configuration or environment)
#[derive(Clone)]
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    /// # Errors
    ///
    /// Returns [`ObscreenError::Config`] for a blank key.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ObscreenError::config("API key is empty"));
        }
        Ok(Self { key })
    }
}

impl fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticApiKey").field("key", &"<redacted>").finish()
    }
}

#[async_trait]
impl ApiKeyProvider for StaticApiKey {
    async fn api_key(&self) -> Result<String> {
        Ok(self.key.clone())
    }
}
