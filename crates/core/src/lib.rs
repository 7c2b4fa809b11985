//! rp-core: Core library for the resprint CLI
//!
//! This crate provides the core functionality for the rp CLI, including:
//! - Configuration management
//! - Resource identity and reference parsing
//! - ObjectTyper trait for resolving manifests to kind, group and name
//! - A file-backed resource store
//!
//! Manifests are handled as schemaless JSON; the only thing this crate
//! needs to know about an object is its identity.

pub mod config;
pub mod error;
pub mod resource;
pub mod store;
pub mod traits;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use resource::{GroupKind, ResourceRef, parse_resource_ref};
pub use store::{ApplyOutcome, ResourceStore, StoreSession, StoredResource};
pub use traits::{ObjectTyper, UnstructuredTyper, list_items};
