//! Tool-call interception pipeline for newscast-rs
//!
//! Every tool call an agent makes can be wrapped by two chains of hooks:
//!
//! - **filters** ([`BeforeToolHook`]) see the outgoing call and may rewrite its
//!   arguments or short-circuit it with a synthetic result;
//! - **annotators** ([`AfterToolHook`]) see the raw result and may replace it
//!   with an enriched one.
//!
//! Both chains read and write the session's audit log through the
//! [`newscast_core::Context`] they are handed, so enforcement actions become
//! visible to the model in later tool results.
//!
//! # Example
//!
//! ```
//! use newscast_core::{Context, ToolCall};
//! use newscast_hooks::{HookConfig, HookPipeline, SourcePolicy};
//!
//! let pipeline = HookPipeline::from_config(&HookConfig {
//!     source_policy: SourcePolicy::default_allow_list(),
//!     enforce_freshness: true,
//!     ..HookConfig::default()
//! });
//!
//! let mut ctx = Context::new();
//! let mut call = ToolCall::new("google_search").with_arg("query", "AI chips");
//! assert!(pipeline.apply_filters(&mut call, &mut ctx).is_none());
//! assert!(call.query().contains("site:techcrunch.com"));
//! assert!(call.query().ends_with("tbs=qdr:w"));
//! ```

pub mod config;
pub mod decision;
pub mod hook;
pub mod pipeline;
pub mod policies;
pub mod query;

pub use config::{HookConfig, SourcePolicy};
pub use decision::{AnnotatedResult, BlockedSource, EnrichedResult, FilterDecision};
pub use hook::{AfterToolHook, BeforeToolHook};
pub use pipeline::HookPipeline;
pub use policies::{
    DomainAllowList, DomainBlockList, FreshnessFilter, SourceAnnotator, extract_source_hosts,
};

/// Name of the web search tool the policies act on by default
pub const DEFAULT_SEARCH_TOOL: &str = "google_search";
