// Tool Registry - binds the current credential into Notion tool descriptors
pub mod blocks;
pub mod comments;
pub mod common;
pub mod databases;
pub mod pages;
pub mod search;
pub mod users;

use crate::{
    credentials::Credential,
    errors::{McpError, McpResult, ToolError, ToolResult},
    mcp::McpTool,
    notion::{schema, NotionClient, Operation},
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Every resource's operations, in listing order.
pub const RESOURCES: &[(&str, &[Operation])] = &[
    ("blocks", blocks::OPERATIONS),
    ("pages", pages::OPERATIONS),
    ("databases", databases::OPERATIONS),
    ("users", users::OPERATIONS),
    ("comments", comments::OPERATIONS),
    ("search", search::OPERATIONS),
];

/// A tool ready to be offered to the model: one operation with the
/// credential that was current when it was bound.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    operation: &'static Operation,
    client: NotionClient,
    credential: Option<Credential>,
}

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.operation.name
    }

    pub fn description(&self) -> &'static str {
        self.operation.description
    }

    pub fn input_schema(&self) -> Value {
        self.operation.input_schema()
    }

    pub fn definition(&self) -> McpTool {
        definition_of(self.operation)
    }

    /// One round trip at most. The credential check comes first, then
    /// argument validation; neither touches the network on failure.
    pub async fn execute(&self, args: Value) -> ToolResult {
        let Some(credential) = &self.credential else {
            debug!(tool = self.name(), "Tool called without a Notion credential");
            return Err(ToolError::MissingCredential);
        };

        let args = if args.is_null() { json!({}) } else { args };
        schema::validate(&args, &self.input_schema()).map_err(ToolError::InvalidArguments)?;

        let request = self.operation.build_request(&args)?;
        self.client.call(credential, request).await
    }

    /// Like [`execute`](Self::execute) but folds errors into the
    /// `{error, details?}` envelope.
    pub async fn invoke(&self, args: Value) -> Value {
        match self.execute(args).await {
            Ok(body) => body,
            Err(e) => {
                warn!(tool = self.name(), error = %e, "Tool call returned an error");
                e.to_envelope()
            }
        }
    }
}

pub struct ToolRegistry {
    client: NotionClient,
    operations: BTreeMap<&'static str, &'static Operation>,
}

impl ToolRegistry {
    pub fn new(client: NotionClient) -> Self {
        let mut operations = BTreeMap::new();
        for (_, resource_operations) in RESOURCES {
            for operation in resource_operations.iter() {
                operations.insert(operation.name, operation);
            }
        }

        info!(tools = operations.len(), api_base = client.api_base(), "🔌 Notion tools registered");
        Self { client, operations }
    }

    pub fn tool_count(&self) -> usize {
        self.operations.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Definitions for `tools/list`, in resource order.
    pub fn list_all_tools(&self) -> Vec<McpTool> {
        RESOURCES
            .iter()
            .flat_map(|(_, operations)| operations.iter())
            .map(definition_of)
            .collect()
    }

    pub fn bind(&self, name: &str, credential: Option<Credential>) -> Option<ToolDescriptor> {
        self.operations.get(name).map(|&operation| ToolDescriptor {
            operation,
            client: self.client.clone(),
            credential,
        })
    }

    pub fn bind_all(&self, credential: Option<Credential>) -> Vec<ToolDescriptor> {
        RESOURCES
            .iter()
            .flat_map(|(_, operations)| operations.iter())
            .map(|operation| ToolDescriptor {
                operation,
                client: self.client.clone(),
                credential: credential.clone(),
            })
            .collect()
    }

    /// Unknown names are a protocol error; everything the tool itself
    /// reports comes back inside `Ok`.
    pub async fn call_tool(
        &self,
        name: &str,
        credential: Option<Credential>,
        args: Value,
    ) -> McpResult<ToolResult> {
        let tool = self
            .bind(name, credential)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        info!(tool = name, "🛠️ Calling Notion tool");
        Ok(tool.execute(args).await)
    }
}

fn definition_of(operation: &Operation) -> McpTool {
    McpTool {
        name: operation.name.to_string(),
        description: operation.description.to_string(),
        input_schema: Some(operation.input_schema()),
    }
}
