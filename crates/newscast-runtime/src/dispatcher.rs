//! Hook-wrapped tool dispatch
//!
//! A dispatch runs in four steps:
//! 1. Run the filter chain; a short-circuit answers the call without touching
//!    the registry
//! 2. Look the tool up by name
//! 3. Execute it; a tool error becomes an error payload and skips annotation
//! 4. Run the annotation chain on the raw result

use async_trait::async_trait;
use newscast_core::{Context, Error, Result, ToolCall};
use newscast_hooks::{HookConfig, HookPipeline};
use newscast_tools::ToolRegistry;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Event handler for dispatch events
///
/// Implement this trait to stream tool call status to a client.
#[async_trait]
pub trait DispatchEventHandler: Send + Sync {
    /// Called before the filter chain runs
    async fn on_tool_start(&self, _call: &ToolCall) {}

    /// Called when a filter answered the call in place of the tool
    async fn on_tool_blocked(&self, _call: &ToolCall, _payload: &Value) {}

    /// Called when the tool finished, successfully or not
    async fn on_tool_done(
        &self,
        _name: &str,
        _result: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }
}

/// No-op event handler for when events are not needed
pub struct NoOpEventHandler;

#[async_trait]
impl DispatchEventHandler for NoOpEventHandler {}

/// How a dispatched call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The tool ran and its (possibly annotated) result is returned
    Completed,
    /// A filter short-circuited the call; the tool never ran
    Blocked,
    /// The tool returned an error
    Failed,
}

/// Result handed back to the agent runtime for one tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutcome {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Arguments the tool actually saw, after filter rewrites
    pub arguments: Value,
    /// Result payload
    pub result: Value,
    /// How the call ended
    pub status: OutcomeStatus,
    /// Wall-clock time spent in the tool
    pub duration_ms: u64,
}

impl ToolOutcome {
    /// Whether a filter answered the call in place of the tool
    pub fn is_blocked(&self) -> bool {
        self.status == OutcomeStatus::Blocked
    }

    /// Whether the tool returned an error
    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

/// Dispatches tool calls through a [`HookPipeline`]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    pipeline: HookPipeline,
    event_handler: Option<Arc<dyn DispatchEventHandler>>,
}

impl ToolDispatcher {
    /// Create a dispatcher
    pub fn new(registry: Arc<ToolRegistry>, pipeline: HookPipeline) -> Self {
        Self {
            registry,
            pipeline,
            event_handler: None,
        }
    }

    /// Create a new dispatcher builder
    pub fn builder() -> ToolDispatcherBuilder {
        ToolDispatcherBuilder::new()
    }

    /// Set the event handler for receiving dispatch events
    pub fn with_event_handler(mut self, handler: Arc<dyn DispatchEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Registry the dispatcher looks tools up in
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Hooks wrapped around every call
    pub fn pipeline(&self) -> &HookPipeline {
        &self.pipeline
    }

    /// Dispatch one tool call within the session owning `ctx`
    ///
    /// Returns [`Error::ToolNotFound`] when no tool is registered under the
    /// call's name. Tool failures are reported through the outcome instead.
    pub async fn dispatch(&self, call: ToolCall, ctx: &mut Context) -> Result<ToolOutcome> {
        let mut call = call;
        let input_preview: String = call.arguments_value().to_string().chars().take(500).collect();
        info!(
            tool_name = %call.name,
            session_id = ctx.session_id().unwrap_or_default(),
            input_preview = %input_preview,
            "Dispatching tool call"
        );

        if let Some(handler) = &self.event_handler {
            handler.on_tool_start(&call).await;
        }

        if let Some(payload) = self.pipeline.apply_filters(&mut call, ctx) {
            info!(tool_name = %call.name, "Tool call answered by filter");
            if let Some(handler) = &self.event_handler {
                handler.on_tool_blocked(&call, &payload).await;
            }
            return Ok(ToolOutcome {
                arguments: call.arguments_value(),
                tool_name: call.name,
                result: payload,
                status: OutcomeStatus::Blocked,
                duration_ms: 0,
            });
        }

        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| Error::ToolNotFound(call.name.clone()))?;

        let start_time = Instant::now();
        let executed = tool.execute(call.arguments_value()).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        let (result, status) = match executed {
            Ok(raw) => {
                let result = self.pipeline.apply_annotations(&call, ctx, raw);
                let result_preview: String = result.to_string().chars().take(500).collect();
                info!(
                    tool_name = %call.name,
                    duration_ms = duration_ms,
                    result_preview = %result_preview,
                    "Tool execution succeeded"
                );
                if let Some(handler) = &self.event_handler {
                    handler
                        .on_tool_done(&call.name, Ok(&result), duration_ms)
                        .await;
                }
                (result, OutcomeStatus::Completed)
            }
            Err(e) => {
                let error_str = e.to_string();
                warn!(
                    tool_name = %call.name,
                    duration_ms = duration_ms,
                    error = %e,
                    "Tool execution failed"
                );
                if let Some(handler) = &self.event_handler {
                    handler
                        .on_tool_done(&call.name, Err(&error_str), duration_ms)
                        .await;
                }
                (
                    json!({"status": "error", "message": error_str}),
                    OutcomeStatus::Failed,
                )
            }
        };

        debug!(tool_name = %call.name, status = ?status, "Dispatch finished");
        Ok(ToolOutcome {
            arguments: call.arguments_value(),
            tool_name: call.name,
            result,
            status,
            duration_ms,
        })
    }
}

/// Builder for [`ToolDispatcher`]
pub struct ToolDispatcherBuilder {
    registry: Option<Arc<ToolRegistry>>,
    pipeline: HookPipeline,
    event_handler: Option<Arc<dyn DispatchEventHandler>>,
}

impl ToolDispatcherBuilder {
    /// Create a new builder with no hooks
    pub fn new() -> Self {
        Self {
            registry: None,
            pipeline: HookPipeline::new(),
            event_handler: None,
        }
    }

    /// Set the tool registry
    pub fn registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the hook pipeline
    pub fn pipeline(mut self, pipeline: HookPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Build the hook pipeline from configuration
    pub fn hooks(mut self, config: &HookConfig) -> Self {
        self.pipeline = HookPipeline::from_config(config);
        self
    }

    /// Set the event handler
    pub fn event_handler(mut self, handler: Arc<dyn DispatchEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> Result<ToolDispatcher> {
        let registry = self
            .registry
            .ok_or_else(|| Error::InitializationFailed("Tool registry not set".to_string()))?;

        Ok(ToolDispatcher {
            registry,
            pipeline: self.pipeline,
            event_handler: self.event_handler,
        })
    }
}

impl Default for ToolDispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
