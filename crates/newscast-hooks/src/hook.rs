//! Hook traits
//!
//! Hooks are synchronous: they inspect data already in memory and record their
//! actions in the session audit log. The only side effect besides the log is a
//! `tracing` event.

use crate::decision::{AnnotatedResult, FilterDecision};
use newscast_core::{Context, ToolCall};
use serde_json::Value;

/// Request filter run before a tool call is dispatched
pub trait BeforeToolHook: Send + Sync {
    /// Name used in traces
    fn name(&self) -> &str;

    /// Decide whether the call proceeds and with which arguments
    ///
    /// Hooks that do not care about `call` must return
    /// `FilterDecision::Continue` with the arguments unchanged.
    fn before_tool(&self, call: &ToolCall, ctx: &mut Context) -> FilterDecision;
}

/// Response annotator run after a tool call completes
pub trait AfterToolHook: Send + Sync {
    /// Name used in traces
    fn name(&self) -> &str;

    /// Inspect the raw result and optionally enrich it
    fn after_tool(&self, call: &ToolCall, ctx: &mut Context, result: Value) -> AnnotatedResult;
}
