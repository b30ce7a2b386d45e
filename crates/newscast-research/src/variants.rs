//! Agent configurations: language, tools, hooks and instructions per variant

use newscast_hooks::{HookConfig, SourcePolicy};
use newscast_tools::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::language::Language;
use crate::prompts::{self, PromptTemplate, PromptVars};
use crate::tools::{
    FINANCIAL_TOOL, MARKDOWN_TOOL, PODCAST_TOOL, SEARCH_TOOL, SENTIMENT_TOOL, WHATSAPP_TOOL,
};

/// Model driving the conversational root agents
pub const LIVE_MODEL: &str = "gemini-2.0-flash-live-001";

/// Model driving the speech sub-agent and the notification agent
pub const PODCASTER_MODEL: &str = "gemini-2.0-flash";

const SEARCH_ONLY: &[&str] = &[SEARCH_TOOL];
const RESEARCH_TOOLS: &[&str] = &[SEARCH_TOOL, FINANCIAL_TOOL, MARKDOWN_TOOL];
const PODCAST_TOOLS: &[&str] = &[SEARCH_TOOL, FINANCIAL_TOOL, MARKDOWN_TOOL, PODCAST_TOOL];
const CHAT_TOOLS: &[&str] = &[SEARCH_TOOL, FINANCIAL_TOOL, SENTIMENT_TOOL];
const NOTIFICATION_TOOLS: &[&str] = &[WHATSAPP_TOOL];

/// The supported agent configurations
///
/// # Examples
///
/// ```
/// use newscast_research::{AgentVariant, Language};
///
/// let variant: AgentVariant = "podcast-es".parse().unwrap();
/// assert_eq!(variant, AgentVariant::PodcastSpanish);
/// assert_eq!(variant.language(), Language::Spanish);
/// assert!(variant.hook_config().enforce_freshness);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AgentVariant {
    /// Spanish assistant with search only and no hooks
    SimpleSearch,
    /// Research coordinator writing a Markdown report
    Research,
    /// Research coordinator with block-list and source annotation
    ResearchAudited,
    /// Podcast producer with allow-list, freshness and annotation
    #[default]
    Podcast,
    /// Spanish podcast producer
    #[serde(rename = "podcast-es")]
    PodcastSpanish,
    /// Interactive analyst with market data and headline sentiment
    #[serde(rename = "chat")]
    ChatAssistant,
    /// Spanish agent sending WhatsApp messages through a remote MCP server
    #[serde(rename = "whatsapp")]
    WhatsAppNotifier,
}

impl AgentVariant {
    /// Every variant
    pub const ALL: [AgentVariant; 7] = [
        AgentVariant::SimpleSearch,
        AgentVariant::Research,
        AgentVariant::ResearchAudited,
        AgentVariant::Podcast,
        AgentVariant::PodcastSpanish,
        AgentVariant::ChatAssistant,
        AgentVariant::WhatsAppNotifier,
    ];

    /// Command-line name, e.g. `research-audited`
    pub fn slug(self) -> &'static str {
        match self {
            AgentVariant::SimpleSearch => "simple-search",
            AgentVariant::Research => "research",
            AgentVariant::ResearchAudited => "research-audited",
            AgentVariant::Podcast => "podcast",
            AgentVariant::PodcastSpanish => "podcast-es",
            AgentVariant::ChatAssistant => "chat",
            AgentVariant::WhatsAppNotifier => "whatsapp",
        }
    }

    /// Name of the root agent
    pub fn agent_name(self) -> &'static str {
        match self {
            AgentVariant::SimpleSearch => "ai_news_agent_simple",
            AgentVariant::Research | AgentVariant::ResearchAudited => {
                "ai_news_research_coordinator"
            }
            AgentVariant::Podcast | AgentVariant::PodcastSpanish => "ai_news_researcher",
            AgentVariant::ChatAssistant => "ai_news_chat_assistant",
            AgentVariant::WhatsAppNotifier => "zapier_agent",
        }
    }

    /// Model of the root agent
    pub fn model(self) -> &'static str {
        match self {
            AgentVariant::WhatsAppNotifier => PODCASTER_MODEL,
            _ => LIVE_MODEL,
        }
    }

    /// Language the agent answers and speaks in
    pub fn language(self) -> Language {
        match self {
            AgentVariant::SimpleSearch
            | AgentVariant::PodcastSpanish
            | AgentVariant::WhatsAppNotifier => Language::Spanish,
            _ => Language::English,
        }
    }

    /// Tools available to the variant, the podcaster's included
    pub fn tool_names(self) -> &'static [&'static str] {
        match self {
            AgentVariant::SimpleSearch => SEARCH_ONLY,
            AgentVariant::Research | AgentVariant::ResearchAudited => RESEARCH_TOOLS,
            AgentVariant::Podcast | AgentVariant::PodcastSpanish => PODCAST_TOOLS,
            AgentVariant::ChatAssistant => CHAT_TOOLS,
            AgentVariant::WhatsAppNotifier => NOTIFICATION_TOOLS,
        }
    }

    /// Whether the variant's tools live on the notification MCP server
    pub fn uses_mcp(self) -> bool {
        self.tool_names().contains(&WHATSAPP_TOOL)
    }

    /// Whether the variant delegates audio to the podcaster sub-agent
    pub fn has_podcaster(self) -> bool {
        matches!(self, AgentVariant::Podcast | AgentVariant::PodcastSpanish)
    }

    /// Hooks installed around the search tool
    pub fn hook_config(self) -> HookConfig {
        match self {
            AgentVariant::SimpleSearch
            | AgentVariant::Research
            | AgentVariant::ChatAssistant
            | AgentVariant::WhatsAppNotifier => HookConfig::passthrough(),
            AgentVariant::ResearchAudited => HookConfig {
                source_policy: SourcePolicy::default_block_list(),
                annotate_sources: true,
                ..HookConfig::default()
            },
            AgentVariant::Podcast | AgentVariant::PodcastSpanish => HookConfig {
                source_policy: SourcePolicy::default_allow_list(),
                enforce_freshness: true,
                annotate_sources: true,
                ..HookConfig::default()
            },
        }
    }

    fn instruction_template(self) -> PromptTemplate {
        match self {
            AgentVariant::SimpleSearch => prompts::simple_search(),
            AgentVariant::Research => prompts::research_coordinator(),
            AgentVariant::ResearchAudited => prompts::audited_coordinator(),
            AgentVariant::Podcast | AgentVariant::PodcastSpanish => prompts::podcast_producer(),
            AgentVariant::ChatAssistant => prompts::chat_assistant(),
            AgentVariant::WhatsAppNotifier => prompts::whatsapp_notifier(),
        }
    }

    /// System instruction of the root agent
    pub fn instruction(self) -> Result<String> {
        self.instruction_template()
            .render(self.language(), &PromptVars::default())
    }

    /// System instruction of the podcaster sub-agent, if the variant has one
    pub fn podcaster_instruction(self) -> Result<Option<String>> {
        if !self.has_podcaster() {
            return Ok(None);
        }
        prompts::podcaster()
            .render(self.language(), &PromptVars::default())
            .map(Some)
    }

    /// The variant's subset of a full tool registry
    pub fn tool_registry(self, registry: &ToolRegistry) -> ToolRegistry {
        registry.filtered(self.tool_names())
    }
}

impl fmt::Display for AgentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AgentVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        AgentVariant::ALL
            .into_iter()
            .find(|v| v.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = AgentVariant::ALL.iter().map(|v| v.slug()).collect();
                format!("unknown variant '{s}', expected one of: {}", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResearchConfig;
    use crate::tools::{Providers, build_registry};
    use newscast_hooks::HookPipeline;

    #[test]
    fn test_slug_round_trip() {
        for variant in AgentVariant::ALL {
            assert_eq!(variant.slug().parse::<AgentVariant>().unwrap(), variant);
            assert_eq!(variant.to_string(), variant.slug());
        }
        assert_eq!(
            "Research_Audited".parse::<AgentVariant>().unwrap(),
            AgentVariant::ResearchAudited
        );
        assert!("voice".parse::<AgentVariant>().is_err());
        assert_eq!(
            serde_json::to_value(AgentVariant::WhatsAppNotifier).unwrap(),
            "whatsapp"
        );
    }

    #[test]
    fn test_added_variants() {
        let chat = AgentVariant::ChatAssistant;
        assert_eq!(chat.agent_name(), "ai_news_chat_assistant");
        assert_eq!(chat.model(), LIVE_MODEL);
        assert_eq!(chat.language(), Language::English);
        assert!(chat.tool_names().contains(&SENTIMENT_TOOL));
        assert!(!chat.uses_mcp());

        let whatsapp = AgentVariant::WhatsAppNotifier;
        assert_eq!(whatsapp.agent_name(), "zapier_agent");
        assert_eq!(whatsapp.model(), "gemini-2.0-flash");
        assert_eq!(whatsapp.language(), Language::Spanish);
        assert_eq!(whatsapp.tool_names(), &[WHATSAPP_TOOL]);
        assert!(whatsapp.uses_mcp());
        assert!(HookPipeline::from_config(&whatsapp.hook_config()).is_empty());
    }

    #[test]
    fn test_hook_configs() {
        let simple = HookPipeline::from_config(&AgentVariant::SimpleSearch.hook_config());
        assert!(simple.is_empty());

        let audited = HookPipeline::from_config(&AgentVariant::ResearchAudited.hook_config());
        assert_eq!(audited.filter_names(), vec!["domain_block_list"]);
        assert_eq!(audited.annotator_names(), vec!["source_annotator"]);

        let podcast = HookPipeline::from_config(&AgentVariant::PodcastSpanish.hook_config());
        assert_eq!(podcast.filter_names(), vec!["domain_allow_list", "freshness"]);
        assert_eq!(podcast.annotator_names(), vec!["source_annotator"]);
    }

    #[test]
    fn test_instructions_follow_language() {
        let simple = AgentVariant::SimpleSearch.instruction().unwrap();
        assert!(simple.contains("español"));
        assert!(simple.contains("`google_search`"));

        let research = AgentVariant::Research.instruction().unwrap();
        assert!(research.contains("ai_research_report.md"));

        let podcast = AgentVariant::PodcastSpanish.instruction().unwrap();
        assert!(podcast.contains("Notas de Fuentes de Datos"));
        assert!(podcast.contains("podcaster_agent"));

        let podcaster = AgentVariant::Podcast.podcaster_instruction().unwrap().unwrap();
        assert!(podcaster.contains("'ai_today_podcast'"));
        assert!(AgentVariant::Research.podcaster_instruction().unwrap().is_none());

        let chat = AgentVariant::ChatAssistant.instruction().unwrap();
        assert!(chat.contains("How many news items"));
        assert!(chat.contains("`analyze_news_sentiment`"));

        let whatsapp = AgentVariant::WhatsAppNotifier.instruction().unwrap();
        assert!(whatsapp.contains("'New Message'"));
        assert!(whatsapp.contains("https://tusitio.com/responder"));
        assert!(whatsapp.contains("whatsapp_notifications_send_message"));
    }

    #[test]
    fn test_variant_registry() {
        let full = build_registry(
            &ResearchConfig::default(),
            &Providers::default(),
            Language::English,
        );

        let research = AgentVariant::Research.tool_registry(&full);
        assert_eq!(research.len(), 1);
        assert!(research.get(MARKDOWN_TOOL).is_some());

        let simple = AgentVariant::SimpleSearch.tool_registry(&full);
        assert!(simple.is_empty());

        let chat = AgentVariant::ChatAssistant.tool_registry(&full);
        assert_eq!(chat.len(), 1);
        assert!(chat.get(SENTIMENT_TOOL).is_some());
    }
}
