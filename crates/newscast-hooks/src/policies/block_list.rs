//! Reject searches aimed at low-quality sources

use crate::DEFAULT_SEARCH_TOOL;
use crate::decision::{BlockedSource, FilterDecision};
use crate::hook::BeforeToolHook;
use crate::query::{domain_stem, site_token};
use newscast_core::{Context, ToolCall};
use tracing::{debug, warn};

/// Sources that are not primary news reporting
pub const DEFAULT_BLOCKED_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "reddit.com",
    "youtube.com",
    "medium.com",
    "investopedia.com",
    "quora.com",
];

/// Short-circuits searches that name a blocked domain
///
/// A query matches when it contains `site:<domain>` or the bare domain name
/// without its suffix (`reddit` for `reddit.com`), case-insensitively.
#[derive(Debug, Clone)]
pub struct DomainBlockList {
    tool_name: String,
    domains: Vec<String>,
}

impl DomainBlockList {
    /// Block-list applied to the default search tool
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tool_name: DEFAULT_SEARCH_TOOL.to_string(),
            domains: domains
                .into_iter()
                .map(|d| d.into().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Apply the policy to a differently named search tool
    pub fn for_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Blocked domains
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// First blocked domain the query refers to
    pub fn matching_domain(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.domains
            .iter()
            .find(|domain| {
                query.contains(&site_token(domain)) || query.contains(domain_stem(domain))
            })
            .map(String::as_str)
    }
}

impl Default for DomainBlockList {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_DOMAINS.iter().copied())
    }
}

impl BeforeToolHook for DomainBlockList {
    fn name(&self) -> &str {
        "domain_block_list"
    }

    fn before_tool(&self, call: &ToolCall, ctx: &mut Context) -> FilterDecision {
        if call.name != self.tool_name {
            return FilterDecision::Continue(call.arguments.clone());
        }

        let query = call.query();
        let Some(domain) = self.matching_domain(query) else {
            debug!(query = %query, "Search query allowed by block-list");
            return FilterDecision::Continue(call.arguments.clone());
        };

        warn!(
            tool_name = %call.name,
            query = %query,
            domain = %domain,
            "Blocked search targeting a blocked source"
        );
        ctx.audit_log_mut().prepend(format!(
            "Action: Blocked a search targeting {domain}, which is not a professional news source."
        ));
        FilterDecision::ShortCircuit(BlockedSource::for_domain(domain).to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str) -> ToolCall {
        ToolCall::new("google_search").with_arg("query", query)
    }

    #[test]
    fn test_blocks_site_token() {
        let policy = DomainBlockList::default();
        let mut ctx = Context::new();

        let decision = policy.before_tool(&search("gpt-5 site:Reddit.com"), &mut ctx);
        let FilterDecision::ShortCircuit(payload) = decision else {
            panic!("expected short-circuit");
        };
        assert_eq!(payload["error"], "blocked_source");
        assert!(payload["reason"].as_str().unwrap().contains("reddit.com"));
        assert_eq!(ctx.audit_log().len(), 1);
    }

    #[test]
    fn test_blocks_bare_name() {
        let policy = DomainBlockList::default();
        let mut ctx = Context::new();

        assert!(
            !policy
                .before_tool(&search("Wikipedia history of transformers"), &mut ctx)
                .is_continue()
        );
        assert_eq!(
            policy.matching_domain("best youtube ai channels"),
            Some("youtube.com")
        );
    }

    #[test]
    fn test_allows_news_queries() {
        let policy = DomainBlockList::default();
        let mut ctx = Context::new();
        let call = search("nvidia earnings site:techcrunch.com");

        assert_eq!(
            policy.before_tool(&call, &mut ctx),
            FilterDecision::Continue(call.arguments.clone())
        );
        assert!(ctx.peek_audit_log().is_none());
    }

    #[test]
    fn test_empty_entries_ignored() {
        let policy = DomainBlockList::new(["", "  ", "reddit.com"]);
        let mut ctx = Context::new();

        assert_eq!(policy.domains(), ["reddit.com"]);
        assert!(policy.before_tool(&search("nvidia earnings"), &mut ctx).is_continue());
        assert!(ctx.peek_audit_log().is_none());
    }

    #[test]
    fn test_other_tools_untouched() {
        let policy = DomainBlockList::default();
        let mut ctx = Context::new();
        let call = ToolCall::new("save_news_to_markdown").with_arg("query", "reddit");

        assert!(policy.before_tool(&call, &mut ctx).is_continue());
    }
}
