//! # Obscreen Core
//!
//! Request construction and dispatch for the Obscreen adapter. No HTTP.
//!
//! This crate contains:
//! - Parameter validators and the resource locator resolver
//! - The request builder and resource-mapper metadata
//! - One operation registry per resource family
//! - The per-item dispatcher
//! - The [`ApiExecutor`] port implemented by infrastructure
//!
//! ## Architecture Principles
//! - Only depends on `obscreen-domain`
//! - All I/O goes through [`ApiExecutor`]

pub mod catalog;
pub mod dispatcher;
pub mod locator;
pub mod mappings;
pub mod params;
pub mod ports;
pub mod request_builder;
pub mod resources;
pub mod search;
pub mod validators;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use catalog::{operation_info, resource_catalog, OperationInfo};
pub use dispatcher::{Dispatcher, ItemError};
pub use locator::{resolve_locator_id, resolve_optional_locator, ResourceLocator};
pub use mappings::{mapping_columns, mapping_fields, MappingColumn, MappingField};
pub use params::ParameterBag;
pub use ports::ApiExecutor;
pub use request_builder::build_url;
pub use search::{filter_results, search, SearchKind};
