//! # Obscreen Domain
//!
//! Types shared by every layer of the Obscreen adapter.
//!
//! This crate contains:
//! - The error taxonomy and Result alias
//! - Adapter configuration
//! - Resource/operation enums and the request/response wire types
//! - Process-wide constants
//!
//! ## Architecture
//! - No dependencies on other Obscreen crates
//! - No I/O

#[macro_use]
pub mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
