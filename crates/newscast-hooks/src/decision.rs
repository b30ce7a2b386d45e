//! Outcomes produced by filter and annotation hooks

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Error kind reported when a search targets a blocked source
pub const BLOCKED_SOURCE: &str = "blocked_source";

/// Result of a request filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDecision {
    /// Dispatch the call with these (possibly rewritten) arguments
    Continue(Map<String, Value>),
    /// Skip the call and every later filter, answering with this result
    ShortCircuit(Value),
}

impl FilterDecision {
    /// Whether the call is allowed to proceed
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Synthetic result returned in place of a blocked search
///
/// Serialises as `{"error": "blocked_source", "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedSource {
    /// Error kind, always [`BLOCKED_SOURCE`]
    #[serde(rename = "error")]
    pub error_kind: String,
    /// Explanation surfaced to the model
    pub reason: String,
}

impl BlockedSource {
    /// Payload for a search that targeted `domain`
    pub fn for_domain(domain: &str) -> Self {
        Self {
            error_kind: BLOCKED_SOURCE.to_string(),
            reason: format!(
                "Searches targeting {domain} or similar are not allowed. \
                 Please search for professional news sources."
            ),
        }
    }

    /// JSON form handed back to the caller
    pub fn to_value(&self) -> Value {
        json!({
            "error": self.error_kind,
            "reason": self.reason,
        })
    }
}

/// Search text bundled with the audit log at the time of annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedResult {
    /// Raw text returned by the search provider
    pub search_results: String,
    /// Full session log, most recent first
    pub process_log: Vec<String>,
}

/// Result of a response annotation hook
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatedResult {
    /// The raw result, untouched
    Unchanged(Value),
    /// Raw text plus an audit log snapshot
    Enriched(EnrichedResult),
}

impl AnnotatedResult {
    /// JSON value handed to the next annotator or back to the caller
    pub fn into_value(self) -> Value {
        match self {
            Self::Unchanged(value) => value,
            Self::Enriched(enriched) => json!({
                "search_results": enriched.search_results,
                "process_log": enriched.process_log,
            }),
        }
    }
}
