//! Agent instruction templates
//!
//! Instructions are bilingual MiniJinja templates. They are rendered with
//! [`PromptVars`] so tool names and output file names stay in sync with the
//! registered tools.

mod system;

pub use system::*;

use crate::error::{ResearchError, Result};
use crate::language::Language;
use minijinja::Environment;
use serde::Serialize;
use std::collections::HashMap;

use crate::tools::{
    DEFAULT_PODCAST_FILENAME, FINANCIAL_TOOL, MARKDOWN_TOOL, PODCAST_TOOL, SEARCH_TOOL,
    SENTIMENT_TOOL, WHATSAPP_TOOL,
};

/// File name the research agents save their report under
pub const REPORT_FILENAME: &str = "ai_research_report.md";

/// Link attached to WhatsApp notifications for replies
pub const REPLY_LINK: &str = "https://tusitio.com/responder";

/// Variables available to every instruction template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptVars {
    pub report_filename: String,
    pub podcast_filename: String,
    pub search_tool: String,
    pub financial_tool: String,
    pub markdown_tool: String,
    pub podcast_tool: String,
    pub podcaster_agent: String,
    pub sentiment_tool: String,
    pub notification_tool: String,
    pub reply_link: String,
}

impl Default for PromptVars {
    fn default() -> Self {
        Self {
            report_filename: REPORT_FILENAME.to_string(),
            podcast_filename: DEFAULT_PODCAST_FILENAME.to_string(),
            search_tool: SEARCH_TOOL.to_string(),
            financial_tool: FINANCIAL_TOOL.to_string(),
            markdown_tool: MARKDOWN_TOOL.to_string(),
            podcast_tool: PODCAST_TOOL.to_string(),
            podcaster_agent: PODCASTER_AGENT.to_string(),
            sentiment_tool: SENTIMENT_TOOL.to_string(),
            notification_tool: WHATSAPP_TOOL.to_string(),
            reply_link: REPLY_LINK.to_string(),
        }
    }
}

/// A named prompt template with one source per language
pub struct PromptTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl PromptTemplate {
    /// Create with English and Spanish sources
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        spanish: impl Into<String>,
    ) -> Self {
        let templates = HashMap::from([
            (Language::English, english.into()),
            (Language::Spanish, spanish.into()),
        ]);
        Self {
            name: name.into(),
            templates,
        }
    }

    /// Template name, e.g. `newscast.research_coordinator`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw source for a language
    pub fn raw_template(&self, language: Language) -> Option<&str> {
        self.templates.get(&language).map(String::as_str)
    }

    /// Render for `language` with `vars`
    pub fn render(&self, language: Language, vars: &impl Serialize) -> Result<String> {
        let source = self.raw_template(language).ok_or_else(|| {
            ResearchError::Prompt(format!(
                "template '{}' has no {} source",
                self.name,
                language.name()
            ))
        })?;

        let env = Environment::new();
        let rendered = env.render_str(source, minijinja::Value::from_serialize(vars))?;
        Ok(rendered.trim().to_string())
    }
}

impl std::fmt::Debug for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptTemplate")
            .field("name", &self.name)
            .field("languages", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}
