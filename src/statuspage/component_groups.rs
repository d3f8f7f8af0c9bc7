//! Statuspage Component Groups
//!
//! Wire model and API calls for `/pages/{page_id}/component-groups`.

use super::client::StatuspageClient;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

const COLLECTION: &str = "component-groups";

/// Component group as returned by the API
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ComponentGroup {
    pub id: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable group fields sent on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroupInput {
    pub name: String,
    pub description: String,
    pub components: Vec<String>,
}

impl ComponentGroupInput {
    /// The API takes `description` next to the group object, not inside it
    fn to_body(&self) -> Value {
        json!({
            "description": self.description,
            "component_group": {
                "name": self.name,
                "components": self.components,
            }
        })
    }
}

fn parse_group(value: Value) -> Result<ComponentGroup> {
    serde_json::from_value(value).context("Failed to parse component group from API response")
}

/// Create a component group on a page
pub async fn create_component_group(
    client: &StatuspageClient,
    page_id: &str,
    input: &ComponentGroupInput,
) -> Result<ComponentGroup> {
    let url = client.page_url(page_id, COLLECTION);
    let response = client.post(&url, &input.to_body()).await?;
    parse_group(response)
}

/// Get a component group; `None` when it does not exist
pub async fn get_component_group(
    client: &StatuspageClient,
    page_id: &str,
    group_id: &str,
) -> Result<Option<ComponentGroup>> {
    let url = client.page_object_url(page_id, COLLECTION, group_id);
    match client.get(&url).await? {
        Some(value) => parse_group(value).map(Some),
        None => Ok(None),
    }
}

/// Update a component group
pub async fn update_component_group(
    client: &StatuspageClient,
    page_id: &str,
    group_id: &str,
    input: &ComponentGroupInput,
) -> Result<ComponentGroup> {
    let url = client.page_object_url(page_id, COLLECTION, group_id);
    let response = client.patch(&url, &input.to_body()).await?;
    parse_group(response)
}

/// Delete a component group
pub async fn delete_component_group(
    client: &StatuspageClient,
    page_id: &str,
    group_id: &str,
) -> Result<()> {
    let url = client.page_object_url(page_id, COLLECTION, group_id);
    client.delete(&url).await
}
