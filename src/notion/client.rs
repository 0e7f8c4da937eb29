// Notion Client - one authenticated round trip per call
use crate::config::{DEFAULT_NOTION_API_BASE, DEFAULT_NOTION_VERSION};
use crate::credentials::Credential;
use crate::errors::{ToolError, ToolResult};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// A fully resolved request against the Notion REST API.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    /// Human label used in error messages, e.g. "Retrieve page".
    pub title: &'static str,
    pub method: Method,
    /// Path relative to the API base, already percent-safe.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    api_base: String,
    notion_version: String,
    http_client: reqwest::Client,
}

impl Default for NotionClient {
    fn default() -> Self {
        Self::new(DEFAULT_NOTION_API_BASE, DEFAULT_NOTION_VERSION)
    }
}

impl NotionClient {
    pub fn new(api_base: impl Into<String>, notion_version: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            notion_version: notion_version.into(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn notion_version(&self) -> &str {
        &self.notion_version
    }

    /// Sends the request once. Non-success statuses and transport
    /// failures come back as [`ToolError`], never as a panic.
    pub async fn call(&self, credential: &Credential, request: RemoteRequest) -> ToolResult {
        let url = self.url_for(&request)?;

        debug!(method = %request.method, url = %url, "📡 Calling Notion API");

        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .bearer_auth(credential.expose())
            .header(NOTION_VERSION_HEADER, &self.notion_version);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(title = request.title, error = %e, "Notion API request failed to complete");
            ToolError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(title = request.title, status = status.as_u16(), "Notion API rejected request");
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(ToolError::Remote {
                title: request.title,
                status: status.as_u16(),
                details,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            ToolError::Transport(format!("Notion API returned a body that is not JSON: {e}"))
        })
    }

    fn url_for(&self, request: &RemoteRequest) -> Result<Url, ToolError> {
        let raw = format!("{}{}", self.api_base, request.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| ToolError::InvalidArguments(format!("cannot build request URL: {e}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}
