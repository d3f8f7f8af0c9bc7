//! `statuspage_component` resource

use super::id::PageResourceId;
use super::schema::{null_as_default, AttributeSchema, AttributeType, ResourceSchema};
use crate::error::ProviderError;
use crate::statuspage::client::StatuspageClient;
use crate::statuspage::components::{self, Component, ComponentInput, ComponentStatus};
use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

pub const TYPE_NAME: &str = "statuspage_component";

/// Accepted values for `status`; empty leaves it unset
pub const STATUS_VALUES: &[&str] = &[
    "operational",
    "under_maintenance",
    "degraded_performance",
    "partial_outage",
    "major_outage",
    "",
];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .with_attribute(AttributeSchema::required(
            "page_id",
            AttributeType::String,
            "the ID of the page this component belongs to",
        ))
        .with_attribute(AttributeSchema::required(
            "name",
            AttributeType::String,
            "Display Name for the component",
        ))
        .with_attribute(AttributeSchema::optional(
            "description",
            AttributeType::String,
            "More detailed description for the component",
        ))
        .with_attribute(
            AttributeSchema::optional("status", AttributeType::String, "Status of component")
                .with_allowed_values(STATUS_VALUES)
                .with_default(ComponentStatus::Operational.as_str()),
        )
        .with_attribute(AttributeSchema::optional(
            "only_show_if_degraded",
            AttributeType::Bool,
            "Should this component be shown component only if in degraded state",
        ))
        .with_attribute(
            AttributeSchema::optional(
                "showcase",
                AttributeType::Bool,
                "Should this component be showcased",
            )
            .with_default(true),
        )
        .with_attribute(AttributeSchema::computed(
            "group_id",
            AttributeType::String,
            "ID of the component group this component belongs to",
        ))
        .with_attribute(AttributeSchema::computed(
            "automation_email",
            AttributeType::String,
            "Email address to send automation events to",
        ))
}

/// Host-side state of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub page_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_status", with = "status_attr")]
    pub status: Option<ComponentStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub only_show_if_degraded: bool,
    #[serde(default = "default_showcase", deserialize_with = "showcase_attr")]
    pub showcase: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub automation_email: String,
}

fn default_status() -> Option<ComponentStatus> {
    Some(ComponentStatus::Operational)
}

fn default_showcase() -> bool {
    true
}

fn showcase_attr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_showcase))
}

/// `status` travels as a plain string where `""` means unset and `null`
/// falls back to the default
mod status_attr {
    use crate::statuspage::components::ComponentStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        status: &Option<ComponentStatus>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(status.map(ComponentStatus::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ComponentStatus>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(super::default_status());
        };
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

impl ComponentState {
    fn require_id(&self) -> Result<&str, ProviderError> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(ProviderError::missing_id)
    }

    fn input(&self) -> ComponentInput {
        ComponentInput {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            only_show_if_degraded: self.only_show_if_degraded,
            showcase: self.showcase,
        }
    }

    /// Copy the fields Statuspage owns into the state
    fn refresh_from(&mut self, component: &Component) {
        self.name = component.name.clone();
        self.description = component.description.clone().unwrap_or_default();
        self.group_id = component.group_id.clone().unwrap_or_default();
        self.only_show_if_degraded = component.only_show_if_degraded;
        self.status = component.status;
        self.showcase = component.showcase;
        self.automation_email = component.automation_email.clone().unwrap_or_default();
    }

    fn from_component(component: &Component) -> Self {
        let mut state = Self {
            id: Some(component.id.clone()),
            page_id: component.page_id.clone(),
            name: String::new(),
            description: String::new(),
            status: None,
            only_show_if_degraded: false,
            showcase: false,
            group_id: String::new(),
            automation_email: String::new(),
        };
        state.refresh_from(component);
        state
    }
}

/// Create the component, then read it back
pub async fn create(
    client: &StatuspageClient,
    state: &ComponentState,
) -> Result<Option<ComponentState>> {
    let component = components::create_component(client, &state.page_id, &state.input())
        .await
        .inspect_err(|e| tracing::warn!("Statuspage Failed creating component: {:#}", e))?;

    tracing::info!("Statuspage Created: {}", component.id);

    let mut created = state.clone();
    created.id = Some(component.id);
    read(client, &created).await
}

/// Refresh state from Statuspage; `None` when the component is gone
pub async fn read(
    client: &StatuspageClient,
    state: &ComponentState,
) -> Result<Option<ComponentState>> {
    let id = state.require_id()?;

    let component = components::get_component(client, &state.page_id, id)
        .await
        .inspect_err(|_| {
            tracing::error!("Statuspage could not find component with ID: {}", id)
        })?;

    let Some(component) = component else {
        tracing::info!("Statuspage could not find component with ID: {}", id);
        return Ok(None);
    };

    tracing::info!("Statuspage read: {}", component.id);
    tracing::debug!("component {} last updated at {:?}", component.id, component.updated_at);

    let mut refreshed = state.clone();
    refreshed.refresh_from(&component);
    Ok(Some(refreshed))
}

/// Push the writable fields, then read back
pub async fn update(
    client: &StatuspageClient,
    state: &ComponentState,
) -> Result<Option<ComponentState>> {
    let id = state.require_id()?;

    components::update_component(client, &state.page_id, id, &state.input())
        .await
        .inspect_err(|e| tracing::warn!("Statuspage Failed updating component: {:#}", e))?;

    read(client, state).await
}

pub async fn delete(client: &StatuspageClient, state: &ComponentState) -> Result<()> {
    let id = state.require_id()?;
    components::delete_component(client, &state.page_id, id).await
}

/// Import an existing component from a `page_id/component_id` string
pub async fn import(client: &StatuspageClient, import_id: &str) -> Result<ComponentState> {
    let resource_id = PageResourceId::parse(import_id)?;

    let component =
        components::get_component(client, &resource_id.page_id, &resource_id.resource_id)
            .await
            .inspect_err(|_| {
                tracing::error!("Statuspage could not find component with ID: {}", import_id)
            })?;

    let Some(component) = component else {
        tracing::error!("Statuspage returns null component with ID: {}", import_id);
        return Err(ProviderError::NotFound {
            kind: "component",
            id: import_id.to_string(),
        }
        .into());
    };

    let mut state = ComponentState::from_component(&component);
    if state.page_id.is_empty() {
        state.page_id = resource_id.page_id;
    }

    tracing::info!("Statuspage imported component: {}", component.id);
    Ok(state)
}
