//! # Obscreen Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - `ObscreenClient`, the live [`ApiExecutor`](obscreen_core::ApiExecutor)
//! - API-key providers
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `obscreen-core`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiKeyProvider, ObscreenClient, StaticApiKey};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
