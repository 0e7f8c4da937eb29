// MCP Server - JSON-RPC handler over newline-delimited stdio
use crate::{
    credentials::CredentialConnector,
    errors::{McpError, McpResult},
    mcp::types::*,
    tools::ToolRegistry,
};
use anyhow::Result;
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    connector: Arc<RwLock<CredentialConnector>>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>, connector: Arc<RwLock<CredentialConnector>>) -> Self {
        Self {
            registry,
            connector,
        }
    }

    pub async fn run(self) -> Result<()> {
        info!("🔗 Notion MCP server starting on stdio");
        info!("🔌 {} Notion tools available", self.registry.tool_count());

        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Reads one request per line until EOF, writing one response line per
    /// request that carries an id.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).await?;
            if n == 0 {
                break; // EOF
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let request = line.trim();
                    if request.is_empty() {
                        continue;
                    }
                    debug!("📨 Received request: {}", request);
                    self.handle_line(request).await
                }
                Err(e) => {
                    error!("❌ Request is not valid UTF-8: {}", e);
                    Some(error_response(None, McpError::Parse(e.to_string())))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let response_str = serde_json::to_string(&response)?;
            debug!("📤 Sending response: {}", response_str);

            writer.write_all(response_str.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// `None` for notifications, which get no reply.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                error!("❌ Malformed request: {}", e);
                return Some(error_response(None, McpError::Parse(e.to_string())));
            }
        };

        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: Some(id),
                result: Some(value),
                error: None,
            },
            Err(e) => {
                error!("❌ Error handling {}: {}", request.method, e);
                error_response(Some(id), e)
            }
        })
    }

    fn initialize(&self, params: Option<Value>) -> McpResult<Value> {
        info!("🔧 Initializing MCP connection");

        let client_info = params
            .and_then(|p| p.get("clientInfo").cloned())
            .and_then(|c| serde_json::from_value::<ClientInfo>(c).ok());

        if let Some(info) = &client_info {
            info!("👤 Client: {} v{}", info.name, info.version);
        }

        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    fn list_tools(&self) -> McpResult<Value> {
        let tools = self.registry.list_all_tools();
        Ok(json!({ "tools": tools }))
    }

    async fn call_tool(&self, params: Option<Value>) -> McpResult<Value> {
        let params = params.ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;
        let call_request: ToolCallRequest = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        // Bound per call so a credential saved mid-session is picked up.
        let credential = self.connector.read().credential();

        let outcome = self
            .registry
            .call_tool(&call_request.name, credential, call_request.arguments)
            .await?;

        let tool_result = match outcome {
            Ok(body) => ToolCallResult::success(serde_json::to_string_pretty(&body)?),
            Err(e) => ToolCallResult::error(serde_json::to_string_pretty(&e.to_envelope())?),
        };
        Ok(serde_json::to_value(tool_result)?)
    }
}

fn error_response(id: Option<Value>, error: McpError) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(error.to_jsonrpc_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credential, MemoryCredentialStore};
    use crate::notion::NotionClient;

    fn server(credential: Option<&str>) -> McpServer {
        let registry = Arc::new(ToolRegistry::new(NotionClient::new(
            "http://127.0.0.1:9",
            "2022-06-28",
        )));
        let connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), "slot")
            .with_fallback(credential.map(Credential::new));
        McpServer::new(registry, Arc::new(RwLock::new(connector)))
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let response = server(None)
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"clientInfo":{"name":"test","version":"1"}}}"#)
            .await
            .expect("response");
        let result = response.result.expect("result");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "notion-tools");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let response = server(None)
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let response = server(None).handle_line("{nope").await.expect("response");
        assert_eq!(response.error.expect("error").code, -32700);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let response = server(None)
            .handle_line(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#)
            .await
            .expect("response");
        assert_eq!(response.id, Some(json!("a")));
        assert_eq!(response.error.expect("error").code, -32601);
    }

    #[tokio::test]
    async fn missing_credential_is_reported_as_tool_error() {
        let response = server(None)
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"users.me","arguments":{}}}"#)
            .await
            .expect("response");
        let result = response.result.expect("result");
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().expect("text");
        let envelope: Value = serde_json::from_str(text).expect("envelope json");
        assert!(envelope["error"].as_str().expect("error").contains("not configured"));
    }

    #[tokio::test]
    async fn unknown_tool_is_a_jsonrpc_error() {
        let response = server(Some("t"))
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#)
            .await
            .expect("response");
        assert_eq!(response.error.expect("error").code, -32601);
    }

    #[tokio::test]
    async fn serve_writes_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();
        server(None)
            .serve(input.as_bytes(), &mut output)
            .await
            .expect("serve");

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["result"]["tools"].as_array().expect("tools").len(), 19);
        assert!(lines[1]["result"]["tools"][0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn serve_survives_non_utf8_line() {
        let mut input = vec![0xFF, 0xFE, b'\n'];
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
        input.push(b'\n');

        let mut output = Vec::new();
        server(None)
            .serve(input.as_slice(), &mut output)
            .await
            .expect("serve");

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], -32700);
        assert!(lines[0]["id"].is_null());
        assert_eq!(lines[1]["id"], 7);
        assert!(lines[1]["result"].is_object());
    }
}
