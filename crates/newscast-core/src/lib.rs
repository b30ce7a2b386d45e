//! Core abstractions for newscast-rs
//!
//! This crate defines the types every other crate in the workspace passes
//! around: the [`ToolCall`] a model asks for, the per-session [`Context`], and
//! the [`SessionAuditLog`] threaded through the interception hooks.

pub mod audit;
pub mod call;
pub mod context;
pub mod error;

pub use audit::{AuditLogEntry, SessionAuditLog};
pub use call::ToolCall;
pub use context::Context;
pub use error::{Error, Result};
