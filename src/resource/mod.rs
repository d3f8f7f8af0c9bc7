//! Resource abstraction layer
//!
//! Each Statuspage object the provider manages is a resource with a declared
//! schema, a typed state record, and create/read/update/delete/import
//! operations that translate directly onto the Statuspage API.
//!
//! # Architecture
//!
//! - [`id`] - `page_id/resource_id` identifiers used by import
//! - [`schema`] - Attribute declarations exposed to the host tool
//! - [`component`] - `statuspage_component`
//! - [`component_group`] - `statuspage_component_group`
//! - [`registry`] - Type name lookup and JSON dispatch at the host boundary
//!
//! # Example
//!
//! ```ignore
//! use crate::resource::{dispatch, Operation, ResourceKind};
//!
//! async fn import(client: &StatuspageClient) -> anyhow::Result<serde_json::Value> {
//!     let op = Operation::Import("pg7abc123/cp9xyz789".to_string());
//!     dispatch(ResourceKind::Component, op, client).await
//! }
//! ```

pub mod component;
pub mod component_group;
pub mod id;
pub mod registry;
pub mod schema;

pub use id::PageResourceId;
pub use registry::{dispatch, get_all_type_names, get_registry, Operation, ResourceKind};
