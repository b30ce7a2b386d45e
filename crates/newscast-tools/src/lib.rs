//! Tool management framework for newscast-rs
//!
//! This crate provides the [`Tool`] trait that every agent capability
//! implements, a [`ToolRegistry`] to look tools up by name, and
//! [`ToolDefinition`] for advertising them to a model.

pub mod definition;
pub mod registry;
pub mod tool;

pub use definition::{ToolDefinition, schema};
pub use registry::ToolRegistry;
pub use tool::Tool;
