//! Statuspage provider
//!
//! Lets an infrastructure-as-code host manage Statuspage components and
//! component groups. Every resource operation maps onto one or two calls to
//! the Statuspage REST API; diffing and planning stay with the host.

pub mod config;
pub mod error;
pub mod resource;
pub mod statuspage;

pub use error::ProviderError;
