//! Record which domains search results came from

use crate::DEFAULT_SEARCH_TOOL;
use crate::decision::{AnnotatedResult, EnrichedResult};
use crate::hook::AfterToolHook;
use newscast_core::{Context, ToolCall};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::info;
use url::Url;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid URL pattern"));

/// Characters that end a sentence rather than a URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\''];

/// Sorted, de-duplicated hosts of every well-formed URL in `text`
///
/// Ports are kept (`host:port`); scheme, credentials and path are dropped.
///
/// # Example
///
/// ```
/// use newscast_hooks::extract_source_hosts;
///
/// let hosts = extract_source_hosts("see https://B.org/z and (http://a.com/x).");
/// assert_eq!(hosts, vec!["a.com", "b.org"]);
/// ```
pub fn extract_source_hosts(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            let candidate = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            let url = Url::parse(candidate).ok()?;
            let host = url.host_str()?;
            Some(match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Prepends a sourcing note to the audit log and bundles the log with the
/// search text
#[derive(Debug, Clone)]
pub struct SourceAnnotator {
    tool_name: String,
}

impl SourceAnnotator {
    /// Annotator for the default search tool
    pub fn new() -> Self {
        Self {
            tool_name: DEFAULT_SEARCH_TOOL.to_string(),
        }
    }

    /// Annotate a differently named search tool
    pub fn for_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }
}

impl Default for SourceAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl AfterToolHook for SourceAnnotator {
    fn name(&self) -> &str {
        "source_annotator"
    }

    fn after_tool(&self, call: &ToolCall, ctx: &mut Context, result: Value) -> AnnotatedResult {
        if call.name != self.tool_name {
            return AnnotatedResult::Unchanged(result);
        }
        let Value::String(text) = result else {
            return AnnotatedResult::Unchanged(result);
        };

        let hosts = extract_source_hosts(&text);
        if !hosts.is_empty() {
            ctx.audit_log_mut().prepend(format!(
                "Action: Sourced news from the following domains: {}.",
                hosts.join(", ")
            ));
        }

        let process_log = ctx.audit_log().snapshot();
        info!(
            tool_name = %call.name,
            source_count = hosts.len(),
            log_entries = process_log.len(),
            "Injecting process log into search result"
        );

        AnnotatedResult::Enriched(EnrichedResult {
            search_results: text,
            process_log,
        })
    }
}
