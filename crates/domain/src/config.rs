//! Adapter configuration structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INSTANCE_URL, DEFAULT_TIMEOUT_SECS};

/// Connection and host settings for one adapter invocation
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Obscreen instance URL (e.g., "https://your_domain.obscreen.io")
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    /// User API key, sent as `Authorization: Bearer <api_key>`
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Emit per-item error records instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_instance_url() -> String {
    DEFAULT_INSTANCE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AdapterConfig {
    pub fn new(instance_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            instance_url: instance_url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            continue_on_fail: false,
            user_agent: None,
        }
    }

    /// Instance URL with exactly one trailing slash removed.
    pub fn base_url(&self) -> &str {
        trim_trailing_slash(&self.instance_url)
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("instance_url", &self.instance_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("continue_on_fail", &self.continue_on_fail)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Strip a single trailing `/`, leaving any others in place.
pub fn trim_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_exactly_one_slash() {
        assert_eq!(AdapterConfig::new("https://h/", "k").base_url(), "https://h");
        assert_eq!(AdapterConfig::new("https://h", "k").base_url(), "https://h");
        assert_eq!(AdapterConfig::new("https://h//", "k").base_url(), "https://h/");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AdapterConfig::new("https://h", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: AdapterConfig = serde_json::from_str(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(config.instance_url, DEFAULT_INSTANCE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.continue_on_fail);
        assert!(!config.accept_invalid_certs);
    }
}
