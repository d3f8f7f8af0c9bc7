//! Error kinds raised by the provider itself
//!
//! Failures coming back from the Statuspage API are plain [`anyhow::Error`]s and
//! pass through the resources untouched. The kinds below originate locally and
//! travel inside `anyhow::Error`, so callers can still `downcast_ref` them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Import identifier without a `/` separator
    #[error("id is not formatted properly; id should be '$page_id/$component_id', but: {0}")]
    MalformedIdentifier(String),

    /// Import target does not exist upstream
    #[error("Statuspage could not find {kind} with ID: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// Host state failed a schema check
    #[error("invalid attribute '{attribute}': {message}")]
    InvalidAttribute {
        attribute: &'static str,
        message: String,
    },

    #[error("no Statuspage API token configured; set STATUSPAGE_TOKEN or pass --token")]
    MissingToken,
}

impl ProviderError {
    pub fn missing_id() -> Self {
        Self::InvalidAttribute {
            attribute: "id",
            message: "resource has no id in state".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_identifier_message() {
        let err = ProviderError::MalformedIdentifier("abc".to_string());
        assert_eq!(
            err.to_string(),
            "id is not formatted properly; id should be '$page_id/$component_id', but: abc"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ProviderError::NotFound {
            kind: "component group",
            id: "pg/grp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Statuspage could not find component group with ID: pg/grp"
        );
    }

    #[test]
    fn test_errors_survive_anyhow_roundtrip() {
        let err: anyhow::Error = ProviderError::missing_id().into();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::InvalidAttribute { attribute: "id", .. })
        ));
    }
}
