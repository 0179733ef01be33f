//! Error types used throughout the adapter

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Obscreen adapter
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObscreenError {
    /// A parameter failed a format or shape check. Raised before any request.
    #[error("Invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid resource locator value: {message}")]
    InvalidLocator { message: String },

    #[error("The resource \"{resource}\" is not supported")]
    UnsupportedResource { resource: String },

    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation { resource: String, operation: String },

    /// The remote API answered with a non-2xx status.
    #[error("Request failed with status code {status}: {message}")]
    Api { status: u16, message: String },

    /// No response was received (connect failure, timeout, TLS, ...).
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Descriptive annotation attached to API failures. No retry is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorHint {
    /// 401
    InvalidCredentials,
    /// 404
    NotFound,
    /// 5xx
    ServerError,
}

impl ApiErrorHint {
    /// Human readable hint for the given resource name.
    pub fn describe(&self, resource: &str) -> String {
        match self {
            Self::InvalidCredentials => "Invalid API key or instance URL".to_string(),
            Self::NotFound => format!("{resource} not found"),
            Self::ServerError => "Server error - please try again later".to_string(),
        }
    }
}

/// Coarse error label for logs and error records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InvalidLocator,
    Unsupported,
    Api,
    Transport,
    Config,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidLocator => "invalid_locator",
            Self::Unsupported => "unsupported",
            Self::Api => "api",
            Self::Transport => "transport",
            Self::Config => "config",
            Self::Internal => "internal",
        }
    }
}

impl ObscreenError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    pub fn invalid_locator(message: impl Into<String>) -> Self {
        Self::InvalidLocator { message: message.into() }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<ApiErrorHint> {
        match self.status()? {
            401 => Some(ApiErrorHint::InvalidCredentials),
            404 => Some(ApiErrorHint::NotFound),
            status if status >= 500 => Some(ApiErrorHint::ServerError),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::InvalidLocator { .. } => ErrorCategory::InvalidLocator,
            Self::UnsupportedResource { .. } | Self::UnsupportedOperation { .. } => {
                ErrorCategory::Unsupported
            }
            Self::Api { .. } => ErrorCategory::Api,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Config { .. } => ErrorCategory::Config,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, ObscreenError>;
