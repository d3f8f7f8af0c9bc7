//! `statuspage_component_group` resource

use super::id::PageResourceId;
use super::schema::{null_as_default, AttributeSchema, AttributeType, ResourceSchema};
use crate::error::ProviderError;
use crate::statuspage::client::StatuspageClient;
use crate::statuspage::component_groups::{self, ComponentGroup, ComponentGroupInput};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const TYPE_NAME: &str = "statuspage_component_group";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .with_attribute(AttributeSchema::required(
            "page_id",
            AttributeType::String,
            "the ID of the page this component group belongs to",
        ))
        .with_attribute(AttributeSchema::required(
            "components",
            AttributeType::StringSet,
            "An array with the IDs of the components in this group",
        ))
        .with_attribute(AttributeSchema::required(
            "name",
            AttributeType::String,
            "Display name for this component group",
        ))
        .with_attribute(AttributeSchema::optional(
            "description",
            AttributeType::String,
            "More detailed description for this component group",
        ))
}

/// Host-side state of a component group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentGroupState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub page_id: String,
    pub components: BTreeSet<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl ComponentGroupState {
    fn require_id(&self) -> Result<&str, ProviderError> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(ProviderError::missing_id)
    }

    fn input(&self) -> ComponentGroupInput {
        ComponentGroupInput {
            name: self.name.clone(),
            description: self.description.clone(),
            components: self.components.iter().cloned().collect(),
        }
    }

    fn refresh_from(&mut self, group: &ComponentGroup) {
        self.name = group.name.clone();
        self.description = group.description.clone().unwrap_or_default();
        self.components = group.components.iter().cloned().collect();
    }

    fn from_group(group: &ComponentGroup) -> Self {
        let mut state = Self {
            id: Some(group.id.clone()),
            page_id: group.page_id.clone(),
            components: BTreeSet::new(),
            name: String::new(),
            description: String::new(),
        };
        state.refresh_from(group);
        state
    }
}

/// Create the group, then read it back
pub async fn create(
    client: &StatuspageClient,
    state: &ComponentGroupState,
) -> Result<Option<ComponentGroupState>> {
    let group = component_groups::create_component_group(client, &state.page_id, &state.input())
        .await
        .inspect_err(|e| tracing::warn!("Statuspage Failed creating component group: {:#}", e))?;

    tracing::info!("Statuspage Created component group: {}", group.id);

    let mut created = state.clone();
    created.id = Some(group.id);
    read(client, &created).await
}

/// Refresh state from Statuspage; `None` when the group is gone
pub async fn read(
    client: &StatuspageClient,
    state: &ComponentGroupState,
) -> Result<Option<ComponentGroupState>> {
    let id = state.require_id()?;

    let group = component_groups::get_component_group(client, &state.page_id, id)
        .await
        .inspect_err(|_| {
            tracing::error!("Statuspage could not find component group with ID: {}", id)
        })?;

    let Some(group) = group else {
        tracing::info!("Statuspage could not find component group with ID: {}", id);
        return Ok(None);
    };

    tracing::info!("Statuspage read component group: {}", group.id);

    let mut refreshed = state.clone();
    refreshed.refresh_from(&group);
    Ok(Some(refreshed))
}

pub async fn update(
    client: &StatuspageClient,
    state: &ComponentGroupState,
) -> Result<Option<ComponentGroupState>> {
    let id = state.require_id()?;

    component_groups::update_component_group(client, &state.page_id, id, &state.input())
        .await
        .inspect_err(|e| tracing::warn!("Statuspage Failed updating component group: {:#}", e))?;

    read(client, state).await
}

pub async fn delete(client: &StatuspageClient, state: &ComponentGroupState) -> Result<()> {
    let id = state.require_id()?;
    component_groups::delete_component_group(client, &state.page_id, id).await
}

/// Import an existing group from a `page_id/group_id` string
pub async fn import(client: &StatuspageClient, import_id: &str) -> Result<ComponentGroupState> {
    let resource_id = PageResourceId::parse(import_id)?;

    let group = component_groups::get_component_group(
        client,
        &resource_id.page_id,
        &resource_id.resource_id,
    )
    .await
    .inspect_err(|_| {
        tracing::error!("Statuspage could not find component group with ID: {}", import_id)
    })?;

    let Some(group) = group else {
        tracing::error!("Statuspage returns null component group with ID: {}", import_id);
        return Err(ProviderError::NotFound {
            kind: "component group",
            id: import_id.to_string(),
        }
        .into());
    };

    let mut state = ComponentGroupState::from_group(&group);
    if state.page_id.is_empty() {
        state.page_id = resource_id.page_id;
    }

    tracing::info!("Statuspage imported component group: {}", group.id);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_components_have_set_semantics() {
        let state: ComponentGroupState = serde_json::from_value(json!({
            "page_id": "pg1",
            "name": "Backend",
            "components": ["cp2", "cp1", "cp2"]
        }))
        .unwrap();

        assert_eq!(state.components.len(), 2);
        assert_eq!(state.input().components, vec!["cp1", "cp2"]);
    }

    #[test]
    fn test_null_description_is_empty() {
        let state: ComponentGroupState = serde_json::from_value(json!({
            "page_id": "pg1",
            "name": "Backend",
            "components": ["cp1"],
            "description": null
        }))
        .unwrap();
        assert_eq!(state.description, "");
    }

    #[test]
    fn test_components_are_required() {
        let result: Result<ComponentGroupState, _> =
            serde_json::from_value(json!({"page_id": "pg1", "name": "Backend"}));
        assert!(result.unwrap_err().to_string().contains("components"));
    }

    #[test]
    fn test_schema_matches_state_fields() {
        let schema = schema();
        let required: Vec<_> = schema.required_attributes().map(|a| a.name).collect();
        assert_eq!(required, vec!["page_id", "components", "name"]);
        assert_eq!(
            schema.attribute("components").unwrap().kind,
            AttributeType::StringSet
        );
    }

    #[test]
    fn test_from_group() {
        let state = ComponentGroupState::from_group(&ComponentGroup {
            id: "grp1".to_string(),
            page_id: "pg1".to_string(),
            name: "Backend".to_string(),
            description: Some("desc".to_string()),
            components: vec!["cp1".to_string()],
            ..Default::default()
        });

        assert_eq!(state.id.as_deref(), Some("grp1"));
        assert_eq!(state.page_id, "pg1");
        assert_eq!(state.description, "desc");
        assert!(state.components.contains("cp1"));
    }
}
