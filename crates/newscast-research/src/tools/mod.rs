//! News research tools for LLM agents

pub mod financial;
pub mod markdown;
pub mod podcast;
pub mod search;
pub mod sentiment;

pub use financial::{FinancialContextTool, QuoteLookup};
pub use markdown::SaveMarkdownTool;
pub use podcast::{DEFAULT_PODCAST_FILENAME, PodcastAudioTool};
pub use search::SearchTool;
pub use sentiment::{Sentiment, SentimentTool};

use newscast_mcp::{HttpMcpClient, McpClient, McpServerConfig};
use newscast_tools::ToolRegistry;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::QuoteCache;
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::language::Language;
use crate::providers::{QuoteProvider, SearchProvider, SpeechSynthesizer};

/// Name of the web search tool
pub const SEARCH_TOOL: &str = newscast_hooks::DEFAULT_SEARCH_TOOL;

/// Name of the market context tool
pub const FINANCIAL_TOOL: &str = "get_financial_context";

/// Name of the Markdown writer tool
pub const MARKDOWN_TOOL: &str = "save_news_to_markdown";

/// Name of the podcast audio tool
pub const PODCAST_TOOL: &str = "generate_podcast_audio";

/// Name of the headline sentiment tool
pub const SENTIMENT_TOOL: &str = "analyze_news_sentiment";

/// Name of the WhatsApp send tool offered by the notification MCP server
pub const WHATSAPP_TOOL: &str = "whatsapp_notifications_send_message";

/// Backends the tools run on
///
/// A tool whose backend is missing is left out of the registry.
#[derive(Clone, Default)]
pub struct Providers {
    /// Web search backend
    pub search: Option<Arc<dyn SearchProvider>>,
    /// Stock quote backend
    pub quotes: Option<Arc<dyn QuoteProvider>>,
    /// Text-to-speech backend
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
}

impl Providers {
    /// Set the search backend
    pub fn with_search(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    /// Set the quote backend
    pub fn with_quotes(mut self, provider: Arc<dyn QuoteProvider>) -> Self {
        self.quotes = Some(provider);
        self
    }

    /// Set the speech backend
    pub fn with_speech(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(synthesizer);
        self
    }
}

/// Register every tool whose backend is available
///
/// The Markdown writer and the sentiment tool need no backend and are always
/// present. Podcast audio
/// is synthesized in `language`.
pub fn build_registry(
    config: &ResearchConfig,
    providers: &Providers,
    language: Language,
) -> ToolRegistry {
    let registry = ToolRegistry::new();

    if let Some(search) = &providers.search {
        registry.register(Arc::new(SearchTool::new(search.clone())));
    }

    if let Some(quotes) = &providers.quotes {
        let cache = QuoteCache::new(config.quote_cache_ttl());
        registry.register(Arc::new(FinancialContextTool::new(quotes.clone(), cache)));
    }

    registry.register(Arc::new(SaveMarkdownTool::new(config.output_dir.clone())));
    registry.register(Arc::new(SentimentTool::new()));

    if let Some(speech) = &providers.speech {
        registry.register(Arc::new(PodcastAudioTool::new(
            speech.clone(),
            config.output_dir.clone(),
            config.voices.clone(),
            language,
        )));
    }

    debug!(tools = registry.len(), language = %language, "Built research tool registry");
    registry
}

/// Connect to the notification MCP server and register its allowed tools
///
/// Returns how many tools were added to `registry`.
pub async fn register_notification_tools(
    server: &McpServerConfig,
    registry: &ToolRegistry,
) -> Result<usize> {
    let client = Arc::new(HttpMcpClient::from_config(server)?);
    client.connect().await?;

    let added = newscast_mcp::register_tools(client, &server.tools, registry).await?;
    info!(added, "Notification tools ready");
    Ok(added)
}

/// Path of `filename` inside `dir`, with `.{extension}` appended when missing
///
/// Only the final path component of `filename` is used, so a tool call can
/// never write outside `dir`.
pub(crate) fn output_path(dir: &Path, filename: &str, extension: &str) -> Result<PathBuf> {
    let name = Path::new(filename.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            ResearchError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid file name '{filename}'"),
            ))
        })?;

    let suffix = format!(".{extension}");
    let name = if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    };
    Ok(dir.join(name))
}

/// `{"status": "error", "message": ...}` tool result
pub(crate) fn status_error(message: String) -> Value {
    json!({"status": "error", "message": message})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::providers::QuoteSnapshot;
    use async_trait::async_trait;

    struct NoQuotes;

    #[async_trait]
    impl QuoteProvider for NoQuotes {
        async fn snapshot(&self, _symbol: &str) -> Result<Option<QuoteSnapshot>> {
            Ok(None)
        }
    }

    #[test]
    fn test_output_path() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            output_path(dir, "report", "md").unwrap(),
            dir.join("report.md")
        );
        assert_eq!(
            output_path(dir, "report.md", "md").unwrap(),
            dir.join("report.md")
        );
        assert_eq!(
            output_path(dir, "../../etc/podcast", "wav").unwrap(),
            dir.join("podcast.wav")
        );
        assert!(output_path(dir, "  ", "md").is_err());
        assert!(output_path(dir, "..", "md").is_err());
    }

    #[test]
    fn test_registry_skips_missing_backends() {
        let config = ResearchConfig::default();

        let registry = build_registry(&config, &Providers::default(), Language::English);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(MARKDOWN_TOOL).is_some());
        assert!(registry.get(SENTIMENT_TOOL).is_some());

        let providers = Providers::default().with_quotes(Arc::new(NoQuotes));
        let registry = build_registry(&config, &providers, Language::English);
        assert!(registry.get(FINANCIAL_TOOL).is_some());
        assert!(registry.get(SEARCH_TOOL).is_none());
        assert!(registry.get(PODCAST_TOOL).is_none());
    }
}
