// Notion Tools - Notion workspace tools for LLM agents
// Exposes typed Notion REST adapters over MCP (stdio) and HTTP, plus the
// credential connector the chat UI uses to store the Notion token.

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod mcp;
pub mod notion;
pub mod tools;

pub use config::NotionToolsConfig;
pub use credentials::{Credential, CredentialConnector};
pub use errors::{McpError, McpResult, ToolError, ToolResult};
pub use mcp::McpServer;
pub use notion::NotionClient;
pub use tools::{ToolDescriptor, ToolRegistry};
