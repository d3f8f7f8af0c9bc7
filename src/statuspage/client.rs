//! Statuspage Client
//!
//! Main client for interacting with the Statuspage API, combining the API
//! token, base URL and HTTP functionality.

use super::http::StatuspageHttpClient;
use crate::config::ProviderConfig;
use anyhow::Result;
use serde_json::Value;
use url::Url;

/// Main Statuspage client
#[derive(Clone)]
pub struct StatuspageClient {
    http: StatuspageHttpClient,
    token: String,
    base_url: Url,
}

impl StatuspageClient {
    /// Create a new Statuspage client
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            http: StatuspageHttpClient::new()?,
            token: config.token.clone(),
            base_url: config.api_url.clone(),
        })
    }

    /// Make a GET request; `None` when the API answers 404
    pub async fn get(&self, url: &str) -> Result<Option<Value>> {
        self.http.get(url, &self.token).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.post(url, &self.token, body).await
    }

    /// Make a PATCH request
    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.patch(url, &self.token, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.http.delete(url, &self.token).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build an API URL from a path relative to the base URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Build a URL scoped to a page, e.g. `pages/{page_id}/components`
    pub fn page_url(&self, page_id: &str, path: &str) -> String {
        self.api_url(&format!("pages/{}/{}", urlencoding::encode(page_id), path))
    }

    /// Build a URL for a single object within a page collection
    pub fn page_object_url(&self, page_id: &str, collection: &str, id: &str) -> String {
        self.page_url(
            page_id,
            &format!("{}/{}", collection, urlencoding::encode(id)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    fn client(api_url: &str) -> StatuspageClient {
        let config = ProviderConfig::resolve(
            Some("token".to_string()),
            Some(api_url.to_string()),
            &FileConfig::default(),
        )
        .unwrap();
        StatuspageClient::new(&config).unwrap()
    }

    #[test]
    fn test_page_url() {
        let client = client("https://api.statuspage.io/v1");
        assert_eq!(
            client.page_url("pg1", "components"),
            "https://api.statuspage.io/v1/pages/pg1/components"
        );
    }

    #[test]
    fn test_page_url_with_trailing_slash_base() {
        let client = client("http://localhost:1234/");
        assert_eq!(
            client.page_url("pg1", "component-groups"),
            "http://localhost:1234/pages/pg1/component-groups"
        );
    }

    #[test]
    fn test_page_object_url_encodes_ids() {
        let client = client("https://api.statuspage.io/v1");
        assert_eq!(
            client.page_object_url("pg 1", "components", "grp1/extra"),
            "https://api.statuspage.io/v1/pages/pg%201/components/grp1%2Fextra"
        );
    }
}
