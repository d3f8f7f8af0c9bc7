//! HTTP utilities for Statuspage REST API calls

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("statuspage-provider/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Statuspage API calls
#[derive(Clone)]
pub struct StatuspageHttpClient {
    client: Client,
}

impl StatuspageHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request; `None` when the object does not exist
    pub async fn get(&self, url: &str, token: &str) -> Result<Option<Value>> {
        tracing::debug!("GET {}", url);

        let request = authorize(self.client.get(url), token);
        let (status, body) = send(request).await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("GET {} returned 404", url);
            return Ok(None);
        }
        check_status(status, &body)?;

        parse_body(&body).map(Some)
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let request = authorize(self.client.post(url), token).json(body);
        let (status, response_body) = send(request).await?;
        check_status(status, &response_body)?;

        parse_body(&response_body)
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        tracing::debug!("PATCH {}", url);

        let request = authorize(self.client.patch(url), token).json(body);
        let (status, response_body) = send(request).await?;
        check_status(status, &response_body)?;

        parse_body(&response_body)
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str) -> Result<()> {
        tracing::debug!("DELETE {}", url);

        let request = authorize(self.client.delete(url), token);
        let (status, body) = send(request).await?;
        check_status(status, &body)
    }
}

/// Statuspage expects `Authorization: OAuth <api key>`
fn authorize(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header(reqwest::header::AUTHORIZATION, format!("OAuth {}", token))
}

async fn send(request: RequestBuilder) -> Result<(StatusCode, String)> {
    let response = request.send().await.context("Failed to send request")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    Ok((status, body))
}

const API_FAILURE_PREFIX: &str = "API request failed";

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
    tracing::error!("API error: {} - {}", status, sanitize_for_log(body));
    Err(anyhow::anyhow!("{}: {}", API_FAILURE_PREFIX, status))
}

/// Whether an error came from talking to the API (transport or HTTP status)
pub fn is_api_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.is::<reqwest::Error>() || cause.to_string().starts_with(API_FAILURE_PREFIX)
    })
}

fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).context("Failed to parse response JSON")
}

/// Format a Statuspage API error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = format!("{:#}", error);

    if error_str.contains("401") {
        return "Authentication failed. Check your Statuspage API token.".to_string();
    }
    if error_str.contains("403") {
        return "Permission denied. The API token cannot manage this page.".to_string();
    }
    if error_str.contains("404") {
        return "Resource not found.".to_string();
    }
    if error_str.contains("409") {
        return "Resource conflict. The resource may already exist or be in use.".to_string();
    }
    if error_str.contains("420") || error_str.contains("429") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if error_str.contains("422") || error_str.contains("400") {
        return "Invalid request. Check the resource attributes.".to_string();
    }
    if error_str.contains("500") || error_str.contains("502") || error_str.contains("503") {
        return "Statuspage service temporarily unavailable. Please try again.".to_string();
    }

    error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect()
}
