//! Seams to the external services the tools depend on
//!
//! The tools only talk to these traits. [`crate::api`] holds the production
//! implementations; tests substitute in-memory fakes.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Web search returning plain text with the URLs it cites
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query
    async fn search(&self, query: &str) -> Result<String>;
}

/// Latest price and daily move of one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Upper-case ticker symbol
    pub symbol: String,
    /// Last traded price
    pub price: f64,
    /// Change against the previous close, in percent
    pub change_percent: f64,
}

impl QuoteSnapshot {
    /// Display form used in reports, e.g. `$950.00 (+1.50%)`
    pub fn display(&self) -> String {
        format!("${:.2} ({:+.2}%)", self.price, self.change_percent)
    }
}

/// Stock quote source
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Latest quote for `symbol`
    ///
    /// `Ok(None)` means the symbol is known but has no usable price data.
    async fn snapshot(&self, symbol: &str) -> Result<Option<QuoteSnapshot>>;
}

/// Speaker name mapped to a prebuilt synthesis voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerVoice {
    /// Name used in the script, e.g. `Joe`
    pub speaker: String,
    /// Prebuilt voice name, e.g. `Kore`
    pub voice: String,
}

impl SpeakerVoice {
    /// Create a speaker/voice pair
    pub fn new(speaker: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            voice: voice.into(),
        }
    }

    /// Default podcast hosts: Joe (Kore) and Jane (Puck)
    pub fn podcast_hosts() -> Vec<Self> {
        vec![Self::new("Joe", "Kore"), Self::new("Jane", "Puck")]
    }
}

/// Multi-speaker synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Full text sent to the model, instruction included
    pub prompt: String,
    /// Voices for each speaker appearing in the script
    pub speakers: Vec<SpeakerVoice>,
}

/// Text-to-speech engine
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize raw 16-bit little-endian mono PCM at 24 kHz
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_display() {
        let quote = QuoteSnapshot {
            symbol: "NVDA".to_string(),
            price: 950.0,
            change_percent: 1.5,
        };
        assert_eq!(quote.display(), "$950.00 (+1.50%)");

        let quote = QuoteSnapshot {
            symbol: "INTC".to_string(),
            price: 31.456,
            change_percent: -2.345,
        };
        assert_eq!(quote.display(), "$31.46 (-2.35%)");
    }
}
