//! MCP client over streamable HTTP
//!
//! Requests are JSON-RPC 2.0 messages sent with HTTP POST. The server answers
//! either with a JSON body or with a short `text/event-stream` whose `data:`
//! lines carry the response. A session id handed out on `initialize` is echoed
//! on every later request.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::Result;
use crate::config::McpServerConfig;
use crate::error::McpError;

/// Protocol revision that introduced streamable HTTP
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Header carrying the server-assigned session id
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Operations the agents need from an MCP server
#[async_trait]
pub trait McpClient: Send + Sync {
    /// Run the `initialize` handshake
    async fn connect(&self) -> Result<()>;

    /// Whether `connect` has succeeded
    fn is_connected(&self) -> bool;

    /// Every tool the server offers
    async fn list_tools(&self) -> Result<Vec<McpToolDefinition>>;

    /// Call a tool by name
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult>;
}

/// Tool definition from `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

/// Result of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolResult {
    #[serde(default)]
    pub content: Vec<McpContent>,
    #[serde(default, rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl McpToolResult {
    /// Text blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                McpContent::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the server flagged the call as failed
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Content block of a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpContent {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Resource {
        resource: Value,
    },
    #[serde(other)]
    Other,
}

/// MCP client using streamable HTTP
pub struct HttpMcpClient {
    url: String,
    headers: HashMap<String, String>,
    http_client: reqwest::Client,
    session_id: Mutex<Option<String>>,
    connected: AtomicBool,
    request_id: AtomicU64,
}

impl HttpMcpClient {
    /// Create a client for `url`
    pub fn new(url: String, headers: HashMap<String, String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| McpError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            url,
            headers,
            http_client,
            session_id: Mutex::new(None),
            connected: AtomicBool::new(false),
            request_id: AtomicU64::new(0),
        })
    }

    /// Create from a server configuration, expanding environment variables
    pub fn from_config(config: &McpServerConfig) -> Result<Self> {
        let config = config.resolved()?;
        Self::new(config.url, config.headers, Duration::from_secs(config.timeout_secs))
    }

    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    async fn build_headers(&self) -> Result<HeaderMap> {
        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header_map.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/event-stream"),
        );

        for (key, value) in &self.headers {
            let name = HeaderName::from_str(key).map_err(|e| {
                McpError::ConfigError(format!("Invalid header name '{key}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                McpError::ConfigError(format!("Invalid header value for '{key}': {e}"))
            })?;
            header_map.insert(name, value);
        }

        if let Some(session_id) = self.session_id.lock().await.as_deref() {
            let value = HeaderValue::from_str(session_id)
                .map_err(|e| McpError::RequestFailed(format!("Invalid session id: {e}")))?;
            header_map.insert(SESSION_HEADER, value);
        }

        Ok(header_map)
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_request_id();
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });

        debug!(method = %method, id, "Sending MCP request");
        let response = self
            .http_client
            .post(&self.url)
            .headers(self.build_headers().await?)
            .json(&request)
            .send()
            .await
            .map_err(|e| McpError::ConnectionFailed(format!("HTTP request failed: {e}")))?;

        if let Some(session_id) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            *self.session_id.lock().await = Some(session_id.to_string());
        }

        let status = response.status();
        let event_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"));
        let body = response
            .text()
            .await
            .map_err(|e| McpError::RequestFailed(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(McpError::RequestFailed(format!(
                "HTTP {status} for {method}: {body}"
            )));
        }

        let message = decode_response(&body, event_stream, id)?;
        rpc_result(method, message)
    }

    async fn notify(&self, method: &str) {
        let notification = json!({"jsonrpc": "2.0", "method": method});
        let Ok(headers) = self.build_headers().await else {
            return;
        };
        if let Err(e) = self
            .http_client
            .post(&self.url)
            .headers(headers)
            .json(&notification)
            .send()
            .await
        {
            debug!(method = %method, error = %e, "MCP notification failed");
        }
    }
}

#[async_trait]
impl McpClient for HttpMcpClient {
    async fn connect(&self) -> Result<()> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "newscast-rs",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let result = self.send_request("initialize", params).await?;
        info!(
            server = %result["serverInfo"]["name"].as_str().unwrap_or("unknown"),
            version = %result["serverInfo"]["version"].as_str().unwrap_or("unknown"),
            "Connected to MCP server"
        );

        self.notify("notifications/initialized").await;
        self.connected.store(true, Ordering::Release);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn list_tools(&self) -> Result<Vec<McpToolDefinition>> {
        if !self.is_connected() {
            return Err(McpError::NotConnected);
        }

        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let params = match &cursor {
                Some(cursor) => json!({"cursor": cursor}),
                None => json!({}),
            };
            let mut result = self.send_request("tools/list", params).await?;

            let page = result.get_mut("tools").map(Value::take).unwrap_or_default();
            let page: Vec<McpToolDefinition> = serde_json::from_value(page)
                .map_err(|e| McpError::RequestFailed(format!("Failed to parse tools: {e}")))?;
            tools.extend(page);

            cursor = result["nextCursor"].as_str().map(ToString::to_string);
            if cursor.is_none() {
                break;
            }
        }
        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult> {
        if !self.is_connected() {
            return Err(McpError::NotConnected);
        }

        let params = json!({"name": name, "arguments": arguments});
        let result = self.send_request("tools/call", params).await?;
        serde_json::from_value(result)
            .map_err(|e| McpError::ToolCallFailed(format!("Failed to parse result: {e}")))
    }
}

/// JSON-RPC message answering request `id`
///
/// Event streams may carry notifications before the response; only the
/// message with the matching id is returned.
fn decode_response(body: &str, event_stream: bool, id: u64) -> Result<Value> {
    if !event_stream {
        return Ok(serde_json::from_str(body)?);
    }

    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .filter_map(|data| serde_json::from_str::<Value>(data.trim()).ok())
        .find(|message| message["id"].as_u64() == Some(id))
        .ok_or_else(|| {
            McpError::RequestFailed(format!("No response for request {id} in event stream"))
        })
}

fn rpc_result(method: &str, mut message: Value) -> Result<Value> {
    if let Some(error) = message.get("error") {
        return Err(McpError::RequestFailed(format!("{method}: {error}")));
    }
    match message.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(McpError::RequestFailed(format!(
            "{method}: no result in response"
        ))),
    }
}
