//! Web search tool

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use crate::providers::SearchProvider;

use super::SEARCH_TOOL;

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

/// Tool running a grounded web search
///
/// Returns the provider's plain text, including the cited URLs, as a JSON
/// string so the source annotator can pick the hosts out of it.
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl SearchTool {
    /// Create a search tool over a provider
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for SearchTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: SearchParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_arguments(SEARCH_TOOL, e))?;

        debug!(query = %params.query, "Running web search");
        let text = self.provider.search(&params.query).await?;
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search the web for recent news. Returns a text answer followed by the \
         list of source URLs it was grounded on."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "query": schema::string("Search query, e.g. 'latest AI chip announcements'"),
            }),
            &["query"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResearchError, Result};
    use std::sync::Mutex;

    struct EchoSearch {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for EchoSearch {
        async fn search(&self, query: &str) -> Result<String> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(format!("results for {query}\n\nSources:\n- https://techcrunch.com/a\n"))
        }
    }

    struct DownSearch;

    #[async_trait]
    impl SearchProvider for DownSearch {
        async fn search(&self, _query: &str) -> Result<String> {
            Err(ResearchError::Api("quota exceeded".to_string()))
        }
    }

    #[tokio::test]
    async fn test_search_returns_text() {
        let provider = Arc::new(EchoSearch {
            queries: Mutex::new(Vec::new()),
        });
        let tool = SearchTool::new(provider.clone());

        let result = tool
            .execute(json!({"query": "AI news site:wired.com"}))
            .await
            .unwrap();

        assert!(result.as_str().unwrap().starts_with("results for AI news"));
        assert_eq!(
            provider.queries.lock().unwrap().as_slice(),
            ["AI news site:wired.com"]
        );
    }

    #[tokio::test]
    async fn test_search_errors() {
        let tool = SearchTool::new(Arc::new(DownSearch));

        let err = tool.execute(json!({"query": "x"})).await.unwrap_err();
        assert!(matches!(err, Error::ToolFailed(_)));
        assert!(err.to_string().contains("quota exceeded"));

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
    }
}
