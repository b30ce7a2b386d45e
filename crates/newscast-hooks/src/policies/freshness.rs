//! Keep search results recent

use crate::DEFAULT_SEARCH_TOOL;
use crate::decision::FilterDecision;
use crate::hook::BeforeToolHook;
use crate::query::{RECENCY_TOKEN, append_clause};
use newscast_core::{Context, ToolCall};
use tracing::info;

/// Appends the last-7-days recency token to search queries lacking one
#[derive(Debug, Clone)]
pub struct FreshnessFilter {
    tool_name: String,
    token: String,
}

impl FreshnessFilter {
    /// Filter on the default search tool using [`RECENCY_TOKEN`]
    pub fn new() -> Self {
        Self {
            tool_name: DEFAULT_SEARCH_TOOL.to_string(),
            token: RECENCY_TOKEN.to_string(),
        }
    }

    /// Apply the filter to a differently named search tool
    pub fn for_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Recency token appended to queries
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Default for FreshnessFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl BeforeToolHook for FreshnessFilter {
    fn name(&self) -> &str {
        "freshness"
    }

    fn before_tool(&self, call: &ToolCall, ctx: &mut Context) -> FilterDecision {
        if call.name != self.tool_name {
            return FilterDecision::Continue(call.arguments.clone());
        }

        let original = call.query();
        if original.contains(&self.token) {
            return FilterDecision::Continue(call.arguments.clone());
        }

        let rewritten = append_clause(original, &self.token);
        info!(
            tool_name = %call.name,
            before = %original,
            after = %rewritten,
            "Modified query for freshness"
        );
        ctx.audit_log_mut()
            .prepend("Action: Limited search results to the last 7 days.");

        let mut rewritten_call = call.clone();
        rewritten_call.set_query(rewritten);
        FilterDecision::Continue(rewritten_call.arguments)
    }
}
