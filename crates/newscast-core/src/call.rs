//! Tool invocation requested by the model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Argument key holding a search query
pub const QUERY_ARG: &str = "query";

/// One invocation of an external capability
///
/// Filter hooks may rewrite `arguments` before the call is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool being invoked
    pub name: String,
    /// Named arguments as produced by the model
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Create a call with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
        }
    }

    /// Add an argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Search query argument, empty when absent or not a string
    pub fn query(&self) -> &str {
        self.arguments
            .get(QUERY_ARG)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Replace the search query argument
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.arguments
            .insert(QUERY_ARG.to_string(), Value::String(query.into()));
    }

    /// Arguments as a JSON object value
    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_to_empty() {
        let call = ToolCall::new("google_search");
        assert_eq!(call.query(), "");

        let call = ToolCall::new("google_search").with_arg("query", 42);
        assert_eq!(call.query(), "");
    }

    #[test]
    fn test_set_query() {
        let mut call = ToolCall::new("google_search").with_arg("query", "ai chips");
        assert_eq!(call.query(), "ai chips");

        call.set_query("ai chips tbs=qdr:w");
        assert_eq!(call.query(), "ai chips tbs=qdr:w");
    }
}
