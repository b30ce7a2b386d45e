//! Ordered chains of filters and annotators

use crate::decision::FilterDecision;
use crate::hook::{AfterToolHook, BeforeToolHook};
use newscast_core::{Context, ToolCall};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Filters and annotators applied around every tool call
///
/// Filters run in insertion order and each sees the arguments produced by the
/// previous one. The first short-circuit stops the chain. Annotators run in
/// insertion order on the result of the previous annotator.
#[derive(Clone, Default)]
pub struct HookPipeline {
    filters: Vec<Arc<dyn BeforeToolHook>>,
    annotators: Vec<Arc<dyn AfterToolHook>>,
}

impl HookPipeline {
    /// Pipeline with no hooks, which passes every call through unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request filter
    pub fn with_filter(mut self, filter: impl BeforeToolHook + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append a response annotator
    pub fn with_annotator(mut self, annotator: impl AfterToolHook + 'static) -> Self {
        self.annotators.push(Arc::new(annotator));
        self
    }

    /// Names of the configured filters, in order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Names of the configured annotators, in order
    pub fn annotator_names(&self) -> Vec<&str> {
        self.annotators.iter().map(|a| a.name()).collect()
    }

    /// Whether the pipeline has no hooks at all
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.annotators.is_empty()
    }

    /// Run the filter chain, rewriting `call.arguments` in place
    ///
    /// Returns the synthetic result when a filter short-circuits; the caller
    /// must then skip the underlying tool.
    pub fn apply_filters(&self, call: &mut ToolCall, ctx: &mut Context) -> Option<Value> {
        for filter in &self.filters {
            match filter.before_tool(call, ctx) {
                FilterDecision::Continue(arguments) => call.arguments = arguments,
                FilterDecision::ShortCircuit(result) => {
                    debug!(
                        tool_name = %call.name,
                        filter = filter.name(),
                        "Filter short-circuited tool call"
                    );
                    return Some(result);
                }
            }
        }
        None
    }

    /// Run the annotation chain over a raw tool result
    pub fn apply_annotations(&self, call: &ToolCall, ctx: &mut Context, result: Value) -> Value {
        self.annotators.iter().fold(result, |current, annotator| {
            annotator.after_tool(call, ctx, current).into_value()
        })
    }
}
