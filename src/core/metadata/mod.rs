//! core::metadata
//!
//! Branch metadata schema and storage.
//!
//! # Modules
//!
//! - [`schema`] - Branch entity record and partial updates
//! - [`store`] - Keyed store with alias index, and the shared JSON document
//!
//! # Architecture
//!
//! Metadata lives in one JSON document shared by every repository the tool
//! is used in. Each repository owns the array stored under its scope key
//! (the absolute working-directory path).

pub mod schema;
pub mod store;

pub use schema::{BranchEntity, BranchUpdate, Property, UnknownProperty};
pub use store::{BranchStore, MetadataFile, StoreError};
