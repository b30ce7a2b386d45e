//! Output language of prompts, reports and podcast audio

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the agent variants speak
///
/// # Examples
///
/// ```
/// use newscast_research::Language;
///
/// assert_eq!(Language::from_code("ES"), Some(Language::Spanish));
/// assert_eq!(Language::Spanish.code(), "es");
/// assert_eq!(Language::from_code("ja"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    /// Spanish
    #[serde(rename = "es", alias = "spanish")]
    Spanish,
}

impl Language {
    /// ISO 639-1 language code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Language name for display
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
        }
    }

    /// Parse from ISO 639-1 code or common name
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" | "en-us" | "en-gb" => Some(Language::English),
            "es" | "spanish" | "español" | "espanol" | "es-es" | "es-mx" => Some(Language::Spanish),
            _ => None,
        }
    }

    /// Instruction placed before a podcast script sent to speech synthesis
    pub fn tts_prefix(self) -> &'static str {
        match self {
            Language::English => "TTS the following conversation between Joe and Jane:",
            Language::Spanish => {
                "Convierte a audio en español la siguiente conversación entre Joe y Jane. \
                 El audio debe estar completamente en español:"
            }
        }
    }

    /// Heading of the report section listing the audit log
    pub fn sourcing_notes_heading(self) -> &'static str {
        match self {
            Language::English => "Data Sourcing Notes",
            Language::Spanish => "Notas de Fuentes de Datos",
        }
    }

    /// Placeholder for data that could not be retrieved
    pub fn not_available(self) -> &'static str {
        match self {
            Language::English => "Not Available",
            Language::Spanish => "No Disponible",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Some(Language::English));
        assert_eq!(Language::from_code("English"), Some(Language::English));
        assert_eq!(Language::from_code("Español"), Some(Language::Spanish));
        assert_eq!(Language::from_code("zh"), None);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Spanish).unwrap(), "\"es\"");
        let parsed: Language = serde_json::from_str("\"english\"").unwrap();
        assert_eq!(parsed, Language::English);
    }

    #[test]
    fn test_localised_strings() {
        assert!(Language::English.tts_prefix().contains("Joe and Jane"));
        assert!(Language::Spanish.tts_prefix().contains("español"));
        assert_eq!(Language::Spanish.not_available(), "No Disponible");
    }
}
