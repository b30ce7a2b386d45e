//! Configuration for news research operations

use crate::error::{ResearchError, Result};
use crate::language::Language;
use crate::providers::SpeakerVoice;
use crate::tools::WHATSAPP_TOOL;
use newscast_mcp::{McpServerConfig, ToolFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variables checked for the Gemini API key, in order
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_VAR: &str = "NEWSCAST_OUTPUT_DIR";

/// Environment variable holding the WhatsApp notification MCP endpoint
pub const NOTIFICATION_URL_VAR: &str = "NEWSCAST_WHATSAPP_MCP_URL";

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the research tools and their API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Directory Markdown reports and WAV files are written to
    pub output_dir: PathBuf,

    /// Gemini API key
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,

    /// Gemini REST base URL
    pub gemini_base_url: String,

    /// Model used for grounded search
    pub search_model: String,

    /// Model used for speech synthesis
    pub tts_model: String,

    /// Podcast speakers and their prebuilt voices
    pub voices: Vec<SpeakerVoice>,

    /// HTTP request timeout, in seconds
    pub request_timeout_secs: u64,

    /// How long a fetched quote stays cached, in seconds
    pub quote_cache_ttl_secs: u64,

    /// Search requests allowed per minute
    pub search_rate_limit: u32,

    /// Default output language
    pub language: Language,

    /// MCP server that sends WhatsApp notifications
    pub notification_server: Option<McpServerConfig>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            search_model: "gemini-2.5-flash".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            voices: SpeakerVoice::podcast_hosts(),
            request_timeout_secs: 30,
            quote_cache_ttl_secs: 60,
            search_rate_limit: 60,
            language: Language::English,
            notification_server: None,
        }
    }
}

impl ResearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their defaults. The result is validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ResearchError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded research configuration");
        config.validate()?;
        Ok(config)
    }

    /// Fill the API key, output directory and notification server from the
    /// environment
    ///
    /// The API key and notification server are only filled when unset.
    pub fn with_env(mut self) -> Self {
        if self.gemini_api_key.is_none() {
            self.gemini_api_key = api_key_from_env();
        }
        if let Ok(dir) = std::env::var(OUTPUT_DIR_VAR) {
            self.output_dir = PathBuf::from(dir);
        }
        if self.notification_server.is_none() {
            self.notification_server = notification_server_from_env();
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.search_rate_limit == 0 {
            return Err(ResearchError::Config(
                "search_rate_limit must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ResearchError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.voices.is_empty() {
            return Err(ResearchError::Config(
                "at least one podcast voice is required".to_string(),
            ));
        }

        let mut speakers: Vec<_> = self.voices.iter().map(|v| v.speaker.as_str()).collect();
        speakers.sort_unstable();
        speakers.dedup();
        if speakers.len() != self.voices.len() {
            return Err(ResearchError::Config(
                "podcast speakers must be unique".to_string(),
            ));
        }

        if self
            .gemini_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err(ResearchError::Config(
                "Gemini API key must not be empty".to_string(),
            ));
        }

        if self
            .notification_server
            .as_ref()
            .is_some_and(|server| server.url.trim().is_empty())
        {
            return Err(ResearchError::Config(
                "notification server URL must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The notification MCP server, or an error naming where to set it
    pub fn require_notification_server(&self) -> Result<&McpServerConfig> {
        self.notification_server.as_ref().ok_or_else(|| {
            ResearchError::Config(format!(
                "WhatsApp notification server not set; export {NOTIFICATION_URL_VAR}"
            ))
        })
    }

    /// The Gemini API key, or an error naming where to set it
    pub fn require_api_key(&self) -> Result<&str> {
        self.gemini_api_key.as_deref().ok_or_else(|| {
            ResearchError::Config(format!(
                "Gemini API key not set; export {}",
                API_KEY_VARS.join(" or ")
            ))
        })
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Quote cache lifetime
    pub fn quote_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.quote_cache_ttl_secs)
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

fn notification_server_from_env() -> Option<McpServerConfig> {
    std::env::var(NOTIFICATION_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(whatsapp_server)
}

/// Notification server at `url` exposing only the WhatsApp send tool
pub fn whatsapp_server(url: impl Into<String>) -> McpServerConfig {
    McpServerConfig::new(url).with_tools(ToolFilter::only([WHATSAPP_TOOL]))
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    output_dir: Option<PathBuf>,
    gemini_api_key: Option<String>,
    gemini_base_url: Option<String>,
    search_model: Option<String>,
    tts_model: Option<String>,
    voices: Option<Vec<SpeakerVoice>>,
    request_timeout_secs: Option<u64>,
    quote_cache_ttl_secs: Option<u64>,
    search_rate_limit: Option<u32>,
    language: Option<Language>,
    notification_server: Option<McpServerConfig>,
}

impl ResearchConfigBuilder {
    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Load the Gemini API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Some(key) = api_key_from_env() {
            self.gemini_api_key = Some(key);
        }
        self
    }

    /// Set the Gemini REST base URL
    pub fn gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = Some(url.into());
        self
    }

    /// Set the search model
    pub fn search_model(mut self, model: impl Into<String>) -> Self {
        self.search_model = Some(model.into());
        self
    }

    /// Set the speech synthesis model
    pub fn tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = Some(model.into());
        self
    }

    /// Set the podcast voices
    pub fn voices(mut self, voices: Vec<SpeakerVoice>) -> Self {
        self.voices = Some(voices);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Set the quote cache lifetime
    pub fn quote_cache_ttl(mut self, ttl: Duration) -> Self {
        self.quote_cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// Set the search rate limit (requests per minute)
    pub fn search_rate_limit(mut self, per_minute: u32) -> Self {
        self.search_rate_limit = Some(per_minute);
        self
    }

    /// Set the default language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the notification MCP server
    pub fn notification_server(mut self, server: McpServerConfig) -> Self {
        self.notification_server = Some(server);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ResearchConfig> {
        let defaults = ResearchConfig::default();

        let config = ResearchConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            gemini_api_key: self.gemini_api_key,
            gemini_base_url: self.gemini_base_url.unwrap_or(defaults.gemini_base_url),
            search_model: self.search_model.unwrap_or(defaults.search_model),
            tts_model: self.tts_model.unwrap_or(defaults.tts_model),
            voices: self.voices.unwrap_or(defaults.voices),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            quote_cache_ttl_secs: self
                .quote_cache_ttl_secs
                .unwrap_or(defaults.quote_cache_ttl_secs),
            search_rate_limit: self.search_rate_limit.unwrap_or(defaults.search_rate_limit),
            language: self.language.unwrap_or(defaults.language),
            notification_server: self.notification_server,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ResearchConfig::default();
        assert_eq!(config.tts_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.voices.len(), 2);
        assert_eq!(config.quote_cache_ttl(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = ResearchConfig::builder()
            .output_dir("/tmp/reports")
            .gemini_api_key("test-key")
            .search_rate_limit(10)
            .request_timeout(Duration::from_secs(90))
            .language(Language::Spanish)
            .build()
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.require_api_key().unwrap(), "test-key");
        assert_eq!(config.search_rate_limit, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(90));
        assert_eq!(config.language, Language::Spanish);
    }

    #[test]
    fn test_validation() {
        assert!(ResearchConfig::builder().search_rate_limit(0).build().is_err());
        assert!(ResearchConfig::builder().gemini_api_key("  ").build().is_err());

        let duplicate = vec![
            SpeakerVoice::new("Joe", "Kore"),
            SpeakerVoice::new("Joe", "Puck"),
        ];
        assert!(ResearchConfig::builder().voices(duplicate).build().is_err());
        assert!(ResearchConfig::builder().voices(Vec::new()).build().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"output_dir": "out", "language": "es", "search_rate_limit": 5}}"#
        )
        .unwrap();

        let config = ResearchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.language, Language::Spanish);
        assert_eq!(config.search_rate_limit, 5);
        assert_eq!(config.search_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"search_rate_limit": 0}}"#).unwrap();
        assert!(matches!(
            ResearchConfig::from_file(file.path()),
            Err(ResearchError::Config(_))
        ));

        assert!(ResearchConfig::from_file("/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_notification_server() {
        assert!(ResearchConfig::default().require_notification_server().is_err());

        let config = ResearchConfig::builder()
            .notification_server(whatsapp_server("https://mcp.example.com/mcp"))
            .build()
            .unwrap();
        let server = config.require_notification_server().unwrap();
        assert_eq!(server.url, "https://mcp.example.com/mcp");
        assert!(server.tools.includes(WHATSAPP_TOOL));
        assert!(!server.tools.includes("gmail_send_email"));

        assert!(
            ResearchConfig::builder()
                .notification_server(whatsapp_server(" "))
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_notification_server_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"notification_server": {{"url": "https://mcp.example.com/${{SECRET}}/mcp", "tools": {{"allow": ["whatsapp_notifications_send_message"]}}}}}}"#
        )
        .unwrap();

        let config = ResearchConfig::from_file(file.path()).unwrap();
        let server = config.notification_server.unwrap();
        assert_eq!(server.url, "https://mcp.example.com/${SECRET}/mcp");
        assert_eq!(server.tools, ToolFilter::only([WHATSAPP_TOOL]));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = ResearchConfig {
            gemini_api_key: Some("secret".to_string()),
            ..ResearchConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
