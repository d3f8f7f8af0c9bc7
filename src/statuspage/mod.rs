//! Statuspage API interaction module
//!
//! This module provides the core functionality for talking to the Statuspage
//! REST API: HTTP plumbing, the authenticated client, and the component and
//! component group endpoints.
//!
//! # Module Structure
//!
//! - [`client`] - Main Statuspage client holding token and base URL
//! - [`http`] - HTTP utilities for REST API calls
//! - [`components`] - Component model and CRUD calls
//! - [`component_groups`] - Component group model and CRUD calls
//!
//! # Example
//!
//! ```ignore
//! use crate::statuspage::{client::StatuspageClient, components};
//!
//! async fn example(config: &ProviderConfig) -> anyhow::Result<()> {
//!     let client = StatuspageClient::new(config)?;
//!     let component = components::get_component(&client, "pg1", "cp1").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod component_groups;
pub mod components;
pub mod http;
