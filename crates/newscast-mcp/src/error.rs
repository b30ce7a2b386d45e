//! Error types for MCP operations

use thiserror::Error;

/// Errors that can occur talking to an MCP server
#[derive(Error, Debug)]
pub enum McpError {
    /// Could not reach the server
    #[error("MCP connection failed: {0}")]
    ConnectionFailed(String),

    /// A request was made before `connect`
    #[error("Not connected to MCP server")]
    NotConnected,

    /// The server rejected a request or answered with something unusable
    #[error("MCP request failed: {0}")]
    RequestFailed(String),

    /// A tool call returned an error result
    #[error("MCP tool call failed: {0}")]
    ToolCallFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Environment variable referenced by the configuration is unset
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convert McpError to newscast_core::Error
impl From<McpError> for newscast_core::Error {
    fn from(err: McpError) -> Self {
        newscast_core::Error::ToolFailed(err.to_string())
    }
}
