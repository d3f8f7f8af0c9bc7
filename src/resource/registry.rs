//! Resource Registry - map host resource type names to handlers
//!
//! The host tool talks in type names and untyped JSON state. This module decodes
//! that state into the typed record of the matching resource, runs the requested
//! operation and encodes the result back.

use super::schema::ResourceSchema;
use super::{component, component_group};
use crate::error::ProviderError;
use crate::statuspage::client::StatuspageClient;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Resource types exposed by this provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Component,
    ComponentGroup,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Component, ResourceKind::ComponentGroup];

    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Component => component::TYPE_NAME,
            ResourceKind::ComponentGroup => component_group::TYPE_NAME,
        }
    }

    pub fn schema(self) -> &'static ResourceSchema {
        &get_registry()[self.type_name()]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ResourceKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == s)
            .ok_or_else(|| ProviderError::UnknownResourceType(s.to_string()))
    }
}

/// Lifecycle operation requested by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create(Value),
    Read(Value),
    Update(Value),
    Delete(Value),
    /// Operator supplied `page_id/resource_id`
    Import(String),
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Create(_) => "create",
            Operation::Read(_) => "read",
            Operation::Update(_) => "update",
            Operation::Delete(_) => "delete",
            Operation::Import(_) => "import",
        }
    }
}

static REGISTRY: OnceLock<BTreeMap<&'static str, ResourceSchema>> = OnceLock::new();

/// Get every resource schema keyed by type name
pub fn get_registry() -> &'static BTreeMap<&'static str, ResourceSchema> {
    REGISTRY.get_or_init(|| {
        [component::schema(), component_group::schema()]
            .into_iter()
            .map(|schema| (schema.type_name, schema))
            .collect()
    })
}

/// Get all resource type names
pub fn get_all_type_names() -> Vec<&'static str> {
    get_registry().keys().copied().collect()
}

/// Run one operation against Statuspage
///
/// Returns the new state, or `Value::Null` when the resource no longer exists
/// (read of a deleted object, or after delete).
pub async fn dispatch(
    kind: ResourceKind,
    operation: Operation,
    client: &StatuspageClient,
) -> Result<Value> {
    tracing::debug!("dispatch: resource={}, operation={}", kind, operation.name());

    match kind {
        ResourceKind::Component => match operation {
            Operation::Create(state) => {
                encode(component::create(client, &decode(kind, state)?).await?)
            }
            Operation::Read(state) => encode(component::read(client, &decode(kind, state)?).await?),
            Operation::Update(state) => {
                encode(component::update(client, &decode(kind, state)?).await?)
            }
            Operation::Delete(state) => {
                component::delete(client, &decode(kind, state)?).await?;
                Ok(Value::Null)
            }
            Operation::Import(id) => encode(Some(component::import(client, &id).await?)),
        },
        ResourceKind::ComponentGroup => match operation {
            Operation::Create(state) => {
                encode(component_group::create(client, &decode(kind, state)?).await?)
            }
            Operation::Read(state) => {
                encode(component_group::read(client, &decode(kind, state)?).await?)
            }
            Operation::Update(state) => {
                encode(component_group::update(client, &decode(kind, state)?).await?)
            }
            Operation::Delete(state) => {
                component_group::delete(client, &decode(kind, state)?).await?;
                Ok(Value::Null)
            }
            Operation::Import(id) => encode(Some(component_group::import(client, &id).await?)),
        },
    }
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, state: Value) -> Result<T> {
    serde_json::from_value(state).with_context(|| format!("Invalid {} state", kind))
}

fn encode<T: Serialize>(state: Option<T>) -> Result<Value> {
    match state {
        Some(state) => serde_json::to_value(state).context("Failed to encode resource state"),
        None => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, ProviderConfig};
    use serde_json::json;
    use tokio_test::{assert_err, block_on};

    fn offline_client() -> StatuspageClient {
        let config = ProviderConfig::resolve(
            Some("token".to_string()),
            Some("http://127.0.0.1:9".to_string()),
            &FileConfig::default(),
        )
        .unwrap();
        StatuspageClient::new(&config).unwrap()
    }

    #[test]
    fn test_registry_loads_successfully() {
        let registry = get_registry();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_all_type_names() {
        assert_eq!(
            get_all_type_names(),
            vec!["statuspage_component", "statuspage_component_group"]
        );
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "statuspage_component".parse::<ResourceKind>(),
            Ok(ResourceKind::Component)
        );
        assert_eq!(
            "statuspage_page".parse::<ResourceKind>(),
            Err(ProviderError::UnknownResourceType("statuspage_page".to_string()))
        );
    }

    #[test]
    fn test_kind_schema_lookup() {
        let schema = ResourceKind::ComponentGroup.schema();
        assert_eq!(schema.type_name, "statuspage_component_group");
        assert!(schema.attribute("components").is_some());
    }

    #[test]
    fn test_import_rejects_malformed_id_before_any_request() {
        let client = offline_client();
        let err = block_on(dispatch(
            ResourceKind::Component,
            Operation::Import("no-separator-here".to_string()),
            &client,
        ))
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ProviderError>(),
            Some(&ProviderError::MalformedIdentifier(
                "no-separator-here".to_string()
            ))
        );
    }

    #[test]
    fn test_read_without_id_fails_locally() {
        let client = offline_client();
        let result = block_on(dispatch(
            ResourceKind::ComponentGroup,
            Operation::Read(json!({"page_id": "pg1", "name": "g", "components": []})),
            &client,
        ));
        let err = assert_err!(result);
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::InvalidAttribute { attribute: "id", .. })
        ));
    }

    #[test]
    fn test_invalid_state_is_reported_with_type_name() {
        let client = offline_client();
        let err = block_on(dispatch(
            ResourceKind::Component,
            Operation::Create(json!({"name": "missing page"})),
            &client,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid statuspage_component state"));
    }
}
