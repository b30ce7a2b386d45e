//! Error types for news research operations

use thiserror::Error;

/// News research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Upstream API answered with an error or an unusable payload
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Quote lookup failed for one ticker
    #[error("Quote lookup failed for {symbol}: {reason}")]
    Quote { symbol: String, reason: String },

    /// Speech synthesis failed
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Notification server failed
    #[error("MCP error: {0}")]
    Mcp(#[from] newscast_mcp::McpError),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

impl ResearchError {
    /// Shorthand for [`ResearchError::Quote`]
    pub fn quote(symbol: impl Into<String>, reason: impl ToString) -> Self {
        Self::Quote {
            symbol: symbol.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert ResearchError to newscast_core::Error
impl From<ResearchError> for newscast_core::Error {
    fn from(err: ResearchError) -> Self {
        newscast_core::Error::ToolFailed(err.to_string())
    }
}

impl From<minijinja::Error> for ResearchError {
    fn from(err: minijinja::Error) -> Self {
        ResearchError::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResearchError::quote("NVDA", "no quotes returned");
        assert_eq!(
            err.to_string(),
            "Quote lookup failed for NVDA: no quotes returned"
        );

        let err = ResearchError::Config("search_rate_limit must be greater than 0".to_string());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_error_conversion() {
        let err: newscast_core::Error = ResearchError::Api("quota exhausted".to_string()).into();

        match err {
            newscast_core::Error::ToolFailed(msg) => assert!(msg.contains("quota exhausted")),
            other => panic!("Expected ToolFailed, got {other:?}"),
        }
    }
}
