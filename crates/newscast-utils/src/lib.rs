//! Shared utilities for newscast-rs
//!
//! This crate holds the tracing setup shared by the workspace binaries.

pub mod logging;

pub use logging::{LogFormat, init_tracing, init_tracing_with};
