//! Statuspage Components
//!
//! Wire model and API calls for `/pages/{page_id}/components`.

use super::client::StatuspageClient;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

const COLLECTION: &str = "components";

/// Operational status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    UnderMaintenance,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
}

impl ComponentStatus {
    pub const ALL: [ComponentStatus; 5] = [
        ComponentStatus::Operational,
        ComponentStatus::UnderMaintenance,
        ComponentStatus::DegradedPerformance,
        ComponentStatus::PartialOutage,
        ComponentStatus::MajorOutage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentStatus::Operational => "operational",
            ComponentStatus::UnderMaintenance => "under_maintenance",
            ComponentStatus::DegradedPerformance => "degraded_performance",
            ComponentStatus::PartialOutage => "partial_outage",
            ComponentStatus::MajorOutage => "major_outage",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unsupported component status '{}'", s))
    }
}

/// Component as returned by the API
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Component {
    pub id: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ComponentStatus>,
    #[serde(default)]
    pub showcase: bool,
    #[serde(default)]
    pub only_show_if_degraded: bool,
    #[serde(default)]
    pub automation_email: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable component fields sent on create and update
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComponentInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    pub only_show_if_degraded: bool,
    pub showcase: bool,
}

impl ComponentInput {
    fn to_body(&self) -> Value {
        json!({ "component": self })
    }
}

fn parse_component(value: Value) -> Result<Component> {
    serde_json::from_value(value).context("Failed to parse component from API response")
}

/// Create a component on a page
pub async fn create_component(
    client: &StatuspageClient,
    page_id: &str,
    input: &ComponentInput,
) -> Result<Component> {
    let url = client.page_url(page_id, COLLECTION);
    let response = client.post(&url, &input.to_body()).await?;
    parse_component(response)
}

/// Get a component; `None` when it does not exist
pub async fn get_component(
    client: &StatuspageClient,
    page_id: &str,
    component_id: &str,
) -> Result<Option<Component>> {
    let url = client.page_object_url(page_id, COLLECTION, component_id);
    match client.get(&url).await? {
        Some(value) => parse_component(value).map(Some),
        None => Ok(None),
    }
}

/// Update the writable fields of a component
pub async fn update_component(
    client: &StatuspageClient,
    page_id: &str,
    component_id: &str,
    input: &ComponentInput,
) -> Result<Component> {
    let url = client.page_object_url(page_id, COLLECTION, component_id);
    let response = client.patch(&url, &input.to_body()).await?;
    parse_component(response)
}

/// Delete a component
pub async fn delete_component(
    client: &StatuspageClient,
    page_id: &str,
    component_id: &str,
) -> Result<()> {
    let url = client.page_object_url(page_id, COLLECTION, component_id);
    client.delete(&url).await
}
