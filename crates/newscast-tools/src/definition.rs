//! Tool definitions advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Tool;

/// Tool definition for an LLM provider
///
/// This describes a tool that the model can use, including its name,
/// description, and input schema in JSON Schema format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in ToolRegistry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Describe a registered tool
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self::new(tool.name(), tool.description(), tool.input_schema())
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use newscast_tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "query": schema::string("Search query"),
    ///     }),
    ///     &["query"],
    /// );
    /// assert_eq!(schema["required"][0], "query");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// String property schema with a default value
    pub fn string_with_default(description: &str, default: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
            "default": default,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let input = schema::object(
            json!({
                "query": schema::string("Search query"),
            }),
            &["query"],
        );

        let def = ToolDefinition::new("google_search", "Search the web", input.clone());
        assert_eq!(def.name, "google_search");
        assert_eq!(def.description, "Search the web");
        assert_eq!(def.input_schema, input);
    }

    #[test]
    fn test_schema_builders() {
        let tickers = schema::array("Tickers", schema::string("A ticker"));
        assert_eq!(tickers["type"], "array");
        assert_eq!(tickers["items"]["type"], "string");

        let filename = schema::string_with_default("File name", "ai_today_podcast");
        assert_eq!(filename["default"], "ai_today_podcast");
    }
}
