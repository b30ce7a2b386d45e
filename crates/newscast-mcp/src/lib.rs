//! Model Context Protocol client for newscast-rs
//!
//! Connects to a remote MCP server over streamable HTTP, discovers the tools
//! it offers and registers the allowed ones in a [`ToolRegistry`] so agents
//! can call them like any local tool.
//!
//! # Example
//!
//! ```no_run
//! use newscast_mcp::{HttpMcpClient, McpClient, McpServerConfig, ToolFilter, register_tools};
//! use newscast_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> newscast_mcp::Result<()> {
//! let server = McpServerConfig::new("https://mcp.example.com/mcp")
//!     .with_tools(ToolFilter::only(["whatsapp_notifications_send_message"]));
//!
//! let client = Arc::new(HttpMcpClient::from_config(&server)?);
//! client.connect().await?;
//!
//! let registry = ToolRegistry::new();
//! let added = register_tools(client, &server.tools, &registry).await?;
//! println!("Registered {added} MCP tools");
//! # Ok(())
//! # }
//! ```
//!
//! [`ToolRegistry`]: newscast_tools::ToolRegistry

pub mod client;
pub mod config;
pub mod error;
pub mod tool;

pub use client::{HttpMcpClient, McpClient, McpContent, McpToolDefinition, McpToolResult};
pub use config::{McpServerConfig, ToolFilter, ToolPattern};
pub use error::McpError;
pub use tool::{McpTool, register_tools};

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;
