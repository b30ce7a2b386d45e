//! Error types for newscast-core

use thiserror::Error;

/// Result type alias for newscast-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared at the tool boundary
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments did not match the tool's schema
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ToolFailed(String),

    /// Component initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArguments`]
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolNotFound("google_search".to_string());
        assert_eq!(err.to_string(), "Tool not found: google_search");

        let err = Error::invalid_arguments("get_financial_context", "missing field `tickers`");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for get_financial_context: missing field `tickers`"
        );
    }
}
