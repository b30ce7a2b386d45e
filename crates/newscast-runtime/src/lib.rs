//! Runtime for dispatching tool calls through the interception hooks
//!
//! [`ToolDispatcher`] wraps a [`newscast_tools::ToolRegistry`] with a
//! [`newscast_hooks::HookPipeline`]; [`SessionStore`] keeps one
//! [`newscast_core::Context`] per conversation so that audit logs never leak
//! between sessions.

pub mod dispatcher;
pub mod session;

pub use dispatcher::{
    DispatchEventHandler, NoOpEventHandler, OutcomeStatus, ToolDispatcher, ToolDispatcherBuilder,
    ToolOutcome,
};
pub use session::SessionStore;
