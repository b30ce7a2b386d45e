//! Restrict search queries to an allow-list of news domains

use crate::DEFAULT_SEARCH_TOOL;
use crate::decision::FilterDecision;
use crate::hook::BeforeToolHook;
use crate::query::{append_clause, has_site_token, site_token};
use newscast_core::{Context, ToolCall};
use tracing::info;

/// News sites searched when no allow-list is configured
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "techcrunch.com",
    "venturebeat.com",
    "theverge.com",
    "technologyreview.com",
    "arstechnica.com",
];

/// Adds `site:` restrictions for every allowed domain unless the query
/// already targets one of them
#[derive(Debug, Clone)]
pub struct DomainAllowList {
    tool_name: String,
    domains: Vec<String>,
}

impl DomainAllowList {
    /// Allow-list applied to the default search tool
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tool_name: DEFAULT_SEARCH_TOOL.to_string(),
            domains: domains
                .into_iter()
                .map(|d| d.into().trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Apply the policy to a differently named search tool
    pub fn for_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Allowed domains, in the order they are appended
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// `site:a OR site:b ...` clause covering every allowed domain
    fn restriction_clause(&self) -> String {
        self.domains
            .iter()
            .map(|domain| site_token(domain))
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

impl Default for DomainAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAINS.iter().copied())
    }
}

impl BeforeToolHook for DomainAllowList {
    fn name(&self) -> &str {
        "domain_allow_list"
    }

    fn before_tool(&self, call: &ToolCall, ctx: &mut Context) -> FilterDecision {
        if call.name != self.tool_name || self.domains.is_empty() {
            return FilterDecision::Continue(call.arguments.clone());
        }

        let original = call.query();
        if self
            .domains
            .iter()
            .any(|domain| has_site_token(original, domain))
        {
            return FilterDecision::Continue(call.arguments.clone());
        }

        let rewritten = append_clause(original, &self.restriction_clause());
        info!(
            tool_name = %call.name,
            before = %original,
            after = %rewritten,
            "Modified query to enforce domain allow-list"
        );
        ctx.audit_log_mut().prepend(format!(
            "Action: Restricted search to allow-listed domains: {}.",
            self.domains.join(", ")
        ));

        let mut rewritten_call = call.clone();
        rewritten_call.set_query(rewritten);
        FilterDecision::Continue(rewritten_call.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str) -> ToolCall {
        ToolCall::new("google_search").with_arg("query", query)
    }

    fn rewritten_query(decision: FilterDecision) -> String {
        match decision {
            FilterDecision::Continue(args) => args["query"].as_str().unwrap().to_string(),
            FilterDecision::ShortCircuit(v) => panic!("unexpected short-circuit: {v}"),
        }
    }

    #[test]
    fn test_appends_or_clause() {
        let policy = DomainAllowList::new(["a.com", "b.org"]);
        let mut ctx = Context::new();

        let query = rewritten_query(policy.before_tool(&search("AI news"), &mut ctx));
        assert_eq!(query, "AI news site:a.com OR site:b.org");
        assert_eq!(ctx.audit_log().len(), 1);
        assert!(
            ctx.audit_log()
                .latest()
                .unwrap()
                .as_str()
                .contains("a.com, b.org")
        );
    }

    #[test]
    fn test_empty_entries_ignored() {
        let policy = DomainAllowList::new(["a.com", ""]);
        assert_eq!(policy.domains(), ["a.com"]);
    }

    #[test]
    fn test_existing_restriction_is_kept() {
        let policy = DomainAllowList::default();
        let mut ctx = Context::new();
        let call = search("openai funding Site:TheVerge.com");

        let decision = policy.before_tool(&call, &mut ctx);
        assert_eq!(decision, FilterDecision::Continue(call.arguments.clone()));
        assert!(ctx.peek_audit_log().is_none());
    }

    #[test]
    fn test_missing_query_gets_restriction_only() {
        let policy = DomainAllowList::new(["a.com"]);
        let mut ctx = Context::new();

        let query = rewritten_query(policy.before_tool(&ToolCall::new("google_search"), &mut ctx));
        assert_eq!(query, "site:a.com");
    }

    #[test]
    fn test_other_tools_untouched() {
        let policy = DomainAllowList::default();
        let mut ctx = Context::new();
        let call = ToolCall::new("get_financial_context").with_arg("query", "NVDA");

        let decision = policy.before_tool(&call, &mut ctx);
        assert_eq!(decision, FilterDecision::Continue(call.arguments.clone()));
    }

    #[test]
    fn test_custom_tool_name() {
        let policy = DomainAllowList::new(["a.com"]).for_tool("web_search");
        let mut ctx = Context::new();

        let call = ToolCall::new("web_search").with_arg("query", "x");
        assert_eq!(
            rewritten_query(policy.before_tool(&call, &mut ctx)),
            "x site:a.com"
        );

        let call = search("x");
        assert_eq!(
            policy.before_tool(&call, &mut ctx),
            FilterDecision::Continue(call.arguments.clone())
        );
    }
}
