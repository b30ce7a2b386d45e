//! News research tools and agent variants for newscast-rs
//!
//! This crate provides the tools the news agents call and the
//! configurations that wire them together:
//!
//! - **Tools**: grounded web search, market context per ticker, Markdown
//!   report writer, two-speaker podcast audio and headline sentiment
//! - **Notifications**: WhatsApp messages sent through a remote MCP server
//! - **Providers**: Gemini for search and speech, Yahoo Finance for quotes,
//!   behind traits so tests can substitute fakes
//! - **Variants**: per-agent language, tool subset, hook configuration and
//!   system instruction
//!
//! # Example
//!
//! ```no_run
//! use newscast_research::{AgentVariant, Providers, ResearchConfig, build_registry};
//! use newscast_research::api::{GeminiClient, YahooQuoteProvider};
//! use std::sync::Arc;
//!
//! # fn main() -> newscast_research::Result<()> {
//! let config = ResearchConfig::default().with_env();
//! let gemini = Arc::new(GeminiClient::new(&config)?);
//! let providers = Providers::default()
//!     .with_search(gemini.clone())
//!     .with_quotes(Arc::new(YahooQuoteProvider::new()))
//!     .with_speech(gemini);
//!
//! let variant = AgentVariant::Podcast;
//! let registry = build_registry(&config, &providers, variant.language());
//! let tools = variant.tool_registry(&registry);
//! println!("{} tools, instruction:\n{}", tools.len(), variant.instruction()?);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod audio;
pub mod cache;
pub mod config;
pub mod error;
pub mod language;
pub mod prompts;
pub mod providers;
pub mod report;
pub mod tools;
pub mod variants;

pub use cache::QuoteCache;
pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use language::Language;
pub use providers::{
    QuoteProvider, QuoteSnapshot, SearchProvider, SpeakerVoice, SpeechRequest, SpeechSynthesizer,
};
pub use report::{NewsReport, NewsStory};
pub use tools::{Providers, build_registry, register_notification_tools};
pub use variants::AgentVariant;
