//! Configuration Management
//!
//! Provider settings come from CLI flags, the environment (both handled by clap
//! in `main`) and an optional JSON config file, in that order of precedence.

use crate::error::ProviderError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Statuspage REST API v1
pub const DEFAULT_API_URL: &str = "https://api.statuspage.io/v1";

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "STATUSPAGE_TOKEN";

/// Environment variable overriding the API URL
pub const API_URL_ENV: &str = "STATUSPAGE_API_URL";

/// On-disk configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Statuspage API token
    #[serde(default)]
    pub token: Option<String>,
    /// Base URL of the Statuspage API
    #[serde(default)]
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("statuspage-provider").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config file {:?}: {:#}", path, e);
            Self::default()
        })
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

/// Effective provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub token: String,
    pub api_url: Url,
}

impl ProviderConfig {
    /// Resolve settings (flag/env > config file > default)
    pub fn resolve(
        token: Option<String>,
        api_url: Option<String>,
        file: &FileConfig,
    ) -> Result<Self> {
        let token = token
            .or_else(|| file.token.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ProviderError::MissingToken)?;

        let api_url = api_url
            .or_else(|| file.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            token,
            api_url: parse_api_url(&api_url)?,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid Statuspage API URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Statuspage API URL must use http or https: {}", raw);
    }
    if url.cannot_be_a_base() {
        anyhow::bail!("Statuspage API URL cannot be used as a base: {}", raw);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(token: Option<&str>, api_url: Option<&str>) -> FileConfig {
        FileConfig {
            token: token.map(String::from),
            api_url: api_url.map(String::from),
        }
    }

    #[test]
    fn test_flag_takes_precedence_over_file() {
        let config = ProviderConfig::resolve(
            Some("from-flag".to_string()),
            None,
            &file(Some("from-file"), None),
        )
        .unwrap();
        assert_eq!(config.token, "from-flag");
    }

    #[test]
    fn test_file_used_when_flag_missing() {
        let config = ProviderConfig::resolve(
            None,
            None,
            &file(Some("from-file"), Some("http://localhost:8080/v1")),
        )
        .unwrap();
        assert_eq!(config.token, "from-file");
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_default_api_url() {
        let config = ProviderConfig::resolve(Some("t".to_string()), None, &FileConfig::default())
            .unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let err = ProviderConfig::resolve(None, None, &FileConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProviderError>(),
            Some(&ProviderError::MissingToken)
        );

        let err = ProviderConfig::resolve(Some("  ".to_string()), None, &FileConfig::default())
            .unwrap_err();
        assert!(err.downcast_ref::<ProviderError>().is_some());
    }

    #[test]
    fn test_rejects_non_http_api_url() {
        let result = ProviderConfig::resolve(
            Some("t".to_string()),
            Some("ftp://example.com".to_string()),
            &FileConfig::default(),
        );
        assert!(result.is_err());

        let result = ProviderConfig::resolve(
            Some("t".to_string()),
            Some("not a url".to_string()),
            &FileConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_file_config_deserializes_partial() {
        let parsed: FileConfig = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(parsed, file(Some("abc"), None));
    }
}
