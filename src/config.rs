// Service Configuration
use crate::credentials::Credential;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_CREDENTIAL_SLOT: &str = "notion_api_key";

#[derive(Debug, Clone)]
pub struct NotionToolsConfig {
    pub service_port: u16,
    pub host: String,

    // Notion REST API
    pub notion_api_base: String,
    pub notion_version: String,

    // Credential storage
    pub credential_file: PathBuf,
    pub credential_slot: String,
    /// Used only while the credential slot is empty.
    pub fallback_token: Option<Credential>,

    pub mcp_stdio: bool,
    pub cors_allowed_origin: Option<String>,
}

impl NotionToolsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service_port: std::env::var("NOTION_TOOLS_PORT")
                .unwrap_or_else(|_| "3010".to_string())
                .parse()
                .context("NOTION_TOOLS_PORT must be a port number")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            notion_api_base: std::env::var("NOTION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_NOTION_API_BASE.to_string()),
            notion_version: std::env::var("NOTION_VERSION")
                .unwrap_or_else(|_| DEFAULT_NOTION_VERSION.to_string()),

            credential_file: std::env::var("NOTION_CREDENTIAL_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_credential_file()),
            credential_slot: std::env::var("NOTION_CREDENTIAL_SLOT")
                .unwrap_or_else(|_| DEFAULT_CREDENTIAL_SLOT.to_string()),
            fallback_token: std::env::var("NOTION_API_KEY")
                .ok()
                .filter(|token| !token.trim().is_empty())
                .map(Credential::new),

            mcp_stdio: parse_bool(std::env::var("MCP_STDIO").ok().as_deref(), true)
                .context("MCP_STDIO must be true or false")?,
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN").ok(),
        })
    }
}

fn default_credential_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notion-tools")
        .join("credentials.json")
}

fn parse_bool(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("unrecognized boolean: {other}"),
        },
    }
}
