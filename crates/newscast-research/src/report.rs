//! Structured news report and its Markdown rendering

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Title used when a report does not set one
pub const DEFAULT_REPORT_TITLE: &str = "AI Research Report";

/// Placeholder the model uses for values it could not find
const MISSING: &[&str] = &["", "n/a", "na", "no financial data"];

/// One news story with its market context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsStory {
    /// Company the story is about, `N/A` if none
    pub company: String,
    /// Stock ticker, `N/A` if private or unknown
    pub ticker: String,
    /// One-sentence summary
    pub summary: String,
    /// Why the story matters
    pub why_it_matters: String,
    /// Price and daily change, e.g. `$950.00 (+1.50%)`
    #[serde(default)]
    pub financial_context: String,
    /// Publisher domain, e.g. `techcrunch.com`
    pub source_domain: String,
    /// Audit log entries returned alongside the search that found the story
    #[serde(default)]
    pub process_log: Vec<String>,
}

/// A structured report of the latest news
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsReport {
    /// Report title
    #[serde(default = "default_title")]
    pub title: String,
    /// High-level summary of the findings
    pub report_summary: String,
    /// Individual stories
    #[serde(default)]
    pub stories: Vec<NewsStory>,
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn is_missing(value: &str) -> bool {
    MISSING.contains(&value.trim().to_lowercase().as_str())
}

impl NewsReport {
    /// Parse a report from JSON
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Audit entries of all stories, in first-seen order without repeats
    pub fn sourcing_notes(&self) -> Vec<&str> {
        let mut notes: Vec<&str> = Vec::new();
        for entry in self.stories.iter().flat_map(|s| &s.process_log) {
            if !notes.contains(&entry.as_str()) {
                notes.push(entry);
            }
        }
        notes
    }

    /// Render as Markdown, ending with the sourcing notes section
    pub fn to_markdown(&self, language: Language) -> String {
        let (company_label, market_label, summary_label, why_label, source_label) = match language
        {
            Language::English => (
                "Company",
                "Market Data",
                "Summary",
                "Why It Matters",
                "Source",
            ),
            Language::Spanish => (
                "Empresa",
                "Datos de Mercado",
                "Resumen",
                "Por Qué Importa",
                "Fuente",
            ),
        };
        let not_available = language.not_available();

        let mut out = format!("# {}\n\n{}\n", self.title, self.report_summary.trim());

        for (index, story) in self.stories.iter().enumerate() {
            let company = if is_missing(&story.company) {
                not_available
            } else {
                story.company.as_str()
            };
            out.push_str(&format!("\n## {}. {company}\n\n", index + 1));

            if is_missing(&story.ticker) {
                out.push_str(&format!("- **{company_label}:** {company}\n"));
            } else {
                out.push_str(&format!(
                    "- **{company_label}:** {company} ({})\n",
                    story.ticker.trim().to_uppercase()
                ));
            }

            let market = if is_missing(&story.financial_context) {
                not_available
            } else {
                story.financial_context.as_str()
            };
            out.push_str(&format!("- **{market_label}:** {market}\n"));
            out.push_str(&format!("- **{summary_label}:** {}\n", story.summary.trim()));
            out.push_str(&format!("- **{why_label}:** {}\n", story.why_it_matters.trim()));
            out.push_str(&format!("- **{source_label}:** {}\n", story.source_domain.trim()));
        }

        out.push_str(&format!("\n## {}\n\n", language.sourcing_notes_heading()));
        let notes = self.sourcing_notes();
        if notes.is_empty() {
            out.push_str(&format!("- {not_available}\n"));
        }
        for note in notes {
            out.push_str(&format!("- {note}\n"));
        }
        out
    }
}
