//! Obscreen REST API access
//!
//! - Bearer API-key authentication
//! - JSON and multipart body encoding
//! - Status classification into `ObscreenError`
//! - Credential probe and list-picker search

pub mod auth;
pub mod client;

pub use auth::{ApiKeyProvider, StaticApiKey};
pub use client::ObscreenClient;
