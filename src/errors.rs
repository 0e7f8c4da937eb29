// Error Types
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub type McpResult<T> = Result<T, McpError>;

/// Protocol-level failures of the MCP and HTTP surfaces.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub fn to_jsonrpc_error(&self) -> McpErrorResponse {
        let code = match self {
            McpError::Parse(_) => -32700,
            McpError::ToolNotFound(_) | McpError::MethodNotFound(_) => -32601,
            McpError::InvalidParams(_) | McpError::Json(_) => -32602,
            _ => -32603,
        };
        McpErrorResponse {
            code,
            message: self.to_string(),
            data: None,
        }
    }
}

pub type ToolResult = Result<Value, ToolError>;

/// Failures of a single tool invocation. These never escape the adapter:
/// they are handed back to the caller as an error envelope.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToolError {
    #[error("Notion API token is not configured. Connect your Notion workspace before using this tool.")]
    MissingCredential,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{title} failed with status {status}")]
    Remote {
        title: &'static str,
        status: u16,
        details: Value,
    },

    #[error("Network error while calling the Notion API")]
    Transport(String),
}

impl ToolError {
    /// `{error, details?}` shape returned to the model or the UI.
    pub fn to_envelope(&self) -> Value {
        match self {
            ToolError::Remote { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            ToolError::Transport(cause) => json!({
                "error": self.to_string(),
                "details": cause,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_envelope_embeds_status_and_details() {
        let err = ToolError::Remote {
            title: "Retrieve page",
            status: 404,
            details: json!({"code": "object_not_found"}),
        };
        let envelope = err.to_envelope();
        assert_eq!(envelope["error"], "Retrieve page failed with status 404");
        assert_eq!(envelope["details"]["code"], "object_not_found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn missing_credential_envelope_has_no_details() {
        let envelope = ToolError::MissingCredential.to_envelope();
        assert!(envelope["error"].as_str().unwrap().contains("not configured"));
        assert!(envelope.get("details").is_none());
    }

    #[test]
    fn jsonrpc_codes() {
        assert_eq!(McpError::ToolNotFound("x".into()).to_jsonrpc_error().code, -32601);
        assert_eq!(McpError::InvalidParams("x".into()).to_jsonrpc_error().code, -32602);
        assert_eq!(McpError::Parse("x".into()).to_jsonrpc_error().code, -32700);
        assert_eq!(McpError::Internal("x".into()).to_jsonrpc_error().code, -32603);
    }
}
