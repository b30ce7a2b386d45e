//! Remote MCP tools behind the local `Tool` trait

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, ToolRegistry};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::Result;
use crate::client::{McpClient, McpContent, McpToolDefinition};
use crate::config::{ToolFilter, ToolPattern};

/// A tool living on an MCP server
///
/// Calls are forwarded to the server unchanged. Text blocks of the reply are
/// joined into `text`; other blocks are summarised so a model can see they
/// were returned.
pub struct McpTool {
    definition: McpToolDefinition,
    client: Arc<dyn McpClient>,
}

impl McpTool {
    /// Wrap a discovered tool
    pub fn new(definition: McpToolDefinition, client: Arc<dyn McpClient>) -> Self {
        Self { definition, client }
    }

    fn convert_content(content: &[McpContent]) -> Value {
        let mut text_parts = Vec::new();
        let mut attachments = Vec::new();

        for block in content {
            match block {
                McpContent::Text { text } => text_parts.push(text.as_str()),
                McpContent::Image { data, mime_type } => attachments.push(json!({
                    "type": "image",
                    "mimeType": mime_type,
                    "dataLength": data.len(),
                })),
                McpContent::Resource { resource } => attachments.push(json!({
                    "type": "resource",
                    "uri": resource.get("uri"),
                })),
                McpContent::Other => {}
            }
        }

        let mut result = json!({"text": text_parts.join("\n")});
        if !attachments.is_empty() {
            result["attachments"] = Value::Array(attachments);
        }
        result
    }
}

#[async_trait]
impl Tool for McpTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let name = &self.definition.name;
        debug!(tool_name = %name, "Calling MCP tool");

        let result = self.client.call_tool(name, params).await?;
        if result.is_error() {
            return Err(Error::ToolFailed(format!(
                "MCP tool '{name}' returned error: {}",
                result.text()
            )));
        }

        Ok(Self::convert_content(&result.content))
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    fn description(&self) -> &str {
        self.definition
            .description
            .as_deref()
            .unwrap_or("No description available")
    }

    fn input_schema(&self) -> Value {
        self.definition.input_schema.clone()
    }
}

/// Register the server's tools that pass `filter`
///
/// Returns how many tools were registered. Names the filter asks for but the
/// server does not offer are logged.
pub async fn register_tools(
    client: Arc<dyn McpClient>,
    filter: &ToolFilter,
    registry: &ToolRegistry,
) -> Result<usize> {
    let offered = client.list_tools().await?;
    let mut added = Vec::new();

    for definition in offered {
        if !filter.includes(&definition.name) {
            debug!(tool_name = %definition.name, "Skipping filtered MCP tool");
            continue;
        }
        added.push(definition.name.clone());
        registry.register(Arc::new(McpTool::new(definition, client.clone())));
    }

    if let ToolPattern::List(wanted) = &filter.allow {
        for name in wanted.iter().filter(|name| !added.contains(name)) {
            warn!(tool_name = %name, "MCP server does not offer an allowed tool");
        }
    }

    info!(tools = ?added, "Registered MCP tools");
    Ok(added.len())
}
