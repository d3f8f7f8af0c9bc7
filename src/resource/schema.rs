//! Resource schema declarations
//!
//! Describes the attributes each resource type exposes to the host tool. The
//! typed state records in [`super::component`] and [`super::component_group`]
//! decode exactly these attributes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode an attribute the host may send as `null`, using the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    /// Unordered set of strings
    StringSet,
}

/// Who supplies the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub description: &'static str,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<&'static str>,
}

impl AttributeSchema {
    fn new(
        name: &'static str,
        kind: AttributeType,
        presence: Presence,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            presence,
            default: None,
            allowed_values: Vec::new(),
        }
    }

    pub fn required(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, Presence::Required, description)
    }

    pub fn optional(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, Presence::Optional, description)
    }

    pub fn computed(name: &'static str, kind: AttributeType, description: &'static str) -> Self {
        Self::new(name, kind, Presence::Computed, description)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed_values(mut self, values: &[&'static str]) -> Self {
        self.allowed_values = values.to_vec();
        self
    }
}

/// Schema of one resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            attributes: vec![AttributeSchema::computed(
                "id",
                AttributeType::String,
                "Identifier assigned by Statuspage",
            )],
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes
            .iter()
            .filter(|a| a.presence == Presence::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serializes_for_host() {
        let schema = ResourceSchema::new("example").with_attribute(
            AttributeSchema::optional("status", AttributeType::String, "Status")
                .with_default("on")
                .with_allowed_values(&["on", "off"]),
        );

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type_name": "example",
                "attributes": [
                    {
                        "name": "id",
                        "type": "string",
                        "description": "Identifier assigned by Statuspage",
                        "presence": "computed"
                    },
                    {
                        "name": "status",
                        "type": "string",
                        "description": "Status",
                        "presence": "optional",
                        "default": "on",
                        "allowed_values": ["on", "off"]
                    }
                ]
            })
        );
    }

    #[derive(Debug, Deserialize)]
    struct Nullable {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
    }

    #[test]
    fn test_null_as_default() {
        let parsed: Nullable = serde_json::from_value(json!({"text": null})).unwrap();
        assert_eq!(parsed.text, "");

        let parsed: Nullable = serde_json::from_value(json!({"text": "set"})).unwrap();
        assert_eq!(parsed.text, "set");

        let parsed: Nullable = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.text, "");
    }
}
