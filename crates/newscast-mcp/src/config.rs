//! Remote MCP server configuration
//!
//! Server URLs and headers may reference environment variables as `${VAR}`
//! or `$VAR`, so endpoints carrying secrets can stay out of config files.

use crate::error::McpError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

/// One MCP server reached over streamable HTTP
///
/// # Example
///
/// ```json
/// {
///   "url": "https://mcp.example.com/api/mcp/s/${ZAPIER_MCP_SECRET}/mcp",
///   "headers": {"Authorization": "Bearer ${MCP_TOKEN}"},
///   "tools": {"allow": ["whatsapp_notifications_send_message"]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Server URL
    pub url: String,

    /// Extra HTTP headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Which of the server's tools are exposed
    #[serde(default)]
    pub tools: ToolFilter,
}

/// Tool filtering configuration
///
/// Deny entries override the allow pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFilter {
    /// Allowed tools ("*" for all, or list of tool names)
    #[serde(default = "default_allow_all")]
    pub allow: ToolPattern,

    /// Denied tools
    #[serde(default)]
    pub deny: Vec<String>,
}

/// Tool pattern specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolPattern {
    /// Allow all tools; only `"*"` matches
    All(String),

    /// Allow specific tools by name
    List(Vec<String>),
}

fn default_timeout() -> u64 {
    30
}

fn default_allow_all() -> ToolPattern {
    ToolPattern::All("*".to_string())
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self {
            allow: default_allow_all(),
            deny: Vec::new(),
        }
    }
}

impl ToolFilter {
    /// Filter exposing exactly the named tools
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: ToolPattern::List(names.into_iter().map(Into::into).collect()),
            deny: Vec::new(),
        }
    }

    /// Whether a discovered tool is exposed
    pub fn includes(&self, tool_name: &str) -> bool {
        if self.deny.iter().any(|denied| denied == tool_name) {
            return false;
        }

        match &self.allow {
            ToolPattern::All(pattern) => pattern == "*",
            ToolPattern::List(allowed) => allowed.iter().any(|allowed| allowed == tool_name),
        }
    }
}

impl McpServerConfig {
    /// Server at `url` with default timeout, no extra headers and every tool
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout_secs: default_timeout(),
            tools: ToolFilter::default(),
        }
    }

    /// Set the tool filter
    pub fn with_tools(mut self, tools: ToolFilter) -> Self {
        self.tools = tools;
        self
    }

    /// Add an HTTP header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Copy with environment variable references in the URL and headers expanded
    pub fn resolved(&self) -> Result<Self, McpError> {
        let mut resolved = self.clone();
        resolved.url = resolve_env_string(&self.url)?;
        for value in resolved.headers.values_mut() {
            *value = resolve_env_string(value)?;
        }
        Ok(resolved)
    }
}

static BRACED_VAR: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern")
});

static BARE_VAR: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid env var pattern")
});

/// Expand `${VAR}` and `$VAR` references from the environment
///
/// An unset variable is an error rather than an empty string.
pub fn resolve_env_string(s: &str) -> Result<String, McpError> {
    let lookup =
        |name: &str| std::env::var(name).map_err(|_| McpError::EnvVarNotFound(name.to_string()));

    let mut result = s.to_string();
    for cap in BRACED_VAR.captures_iter(s) {
        result = result.replace(&cap[0], &lookup(&cap[1])?);
    }

    let braced_done = result.clone();
    for cap in BARE_VAR.captures_iter(&braced_done) {
        result = result.replace(&cap[0], &lookup(&cap[1])?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let json = r#"{
            "url": "http://localhost:8080/mcp",
            "headers": {"Authorization": "Bearer token"},
            "tools": {"allow": ["send_message"]}
        }"#;

        let config: McpServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.url, "http://localhost:8080/mcp");
        assert_eq!(config.headers["Authorization"], "Bearer token");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.tools, ToolFilter::only(["send_message"]));
    }

    #[test]
    fn test_tools_default_to_all() {
        let config: McpServerConfig = serde_json::from_str(r#"{"url": "http://x/mcp"}"#).unwrap();
        assert!(config.tools.includes("anything"));
    }

    #[test]
    fn test_tool_filtering() {
        let filter = ToolFilter {
            allow: ToolPattern::List(vec!["send_message".to_string(), "read".to_string()]),
            deny: vec!["read".to_string()],
        };

        assert!(filter.includes("send_message"));
        assert!(!filter.includes("read"));
        assert!(!filter.includes("delete_contact"));

        let wildcard = ToolFilter {
            allow: ToolPattern::All("*".to_string()),
            deny: vec!["delete_contact".to_string()],
        };
        assert!(wildcard.includes("send_message"));
        assert!(!wildcard.includes("delete_contact"));

        let bogus = ToolFilter {
            allow: ToolPattern::All("send_*".to_string()),
            deny: Vec::new(),
        };
        assert!(!bogus.includes("send_message"));
    }

    #[test]
    fn test_env_var_resolution() {
        unsafe {
            std::env::set_var("NEWSCAST_MCP_TEST_SECRET", "s3cr3t");
        }

        let config =
            McpServerConfig::new("https://mcp.example.com/s/${NEWSCAST_MCP_TEST_SECRET}/mcp")
                .with_header("X-Token", "$NEWSCAST_MCP_TEST_SECRET");
        let resolved = config.resolved().unwrap();

        assert_eq!(resolved.url, "https://mcp.example.com/s/s3cr3t/mcp");
        assert_eq!(resolved.headers["X-Token"], "s3cr3t");
        assert_eq!(resolve_env_string("plain").unwrap(), "plain");
    }

    #[test]
    fn test_missing_env_var() {
        let err = resolve_env_string("${NEWSCAST_MCP_TEST_UNSET_VAR}").unwrap_err();
        assert!(
            matches!(err, McpError::EnvVarNotFound(name) if name == "NEWSCAST_MCP_TEST_UNSET_VAR")
        );
    }
}
