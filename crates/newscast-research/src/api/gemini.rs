//! Gemini REST client for grounded search and multi-speaker speech

use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::providers::{SearchProvider, SpeakerVoice, SpeechRequest, SpeechSynthesizer};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl WebSource {
    /// URL cited for this source
    ///
    /// Grounding URIs are redirect links; when the title is a bare domain the
    /// source is cited as `https://<title>` so the real publisher shows up.
    fn citation(&self) -> Option<String> {
        let from_title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.contains(char::is_whitespace) && t.contains('.'))
            .map(|t| format!("https://{t}"))
            .filter(|candidate| Url::parse(candidate).is_ok());
        from_title.or_else(|| self.uri.clone())
    }
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    search_model: String,
    tts_model: String,
    rate_limiter: SharedRateLimiter,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let per_minute = NonZeroU32::new(config.search_rate_limit).ok_or_else(|| {
            ResearchError::Config("search_rate_limit must be greater than 0".to_string())
        })?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            search_model: config.search_model.clone(),
            tts_model: config.tts_model.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
        })
    }

    async fn generate(&self, model: &str, body: &Value) -> Result<GenerateContentResponse> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/models/{model}:generateContent", self.base_url);
        debug!(model = %model, "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::Api(format!("Gemini API error {status}: {body}")));
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

/// Request body for a grounded search
fn search_body(query: &str) -> Value {
    json!({
        "contents": [{"role": "user", "parts": [{"text": query}]}],
        "tools": [{"google_search": {}}],
    })
}

/// Request body for multi-speaker speech synthesis
fn speech_body(prompt: &str, speakers: &[SpeakerVoice]) -> Value {
    let speaker_configs: Vec<Value> = speakers
        .iter()
        .map(|s| {
            json!({
                "speaker": s.speaker,
                "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": s.voice}},
            })
        })
        .collect();

    json!({
        "contents": [{"parts": [{"text": prompt}]}],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "multiSpeakerVoiceConfig": {"speakerVoiceConfigs": speaker_configs},
            },
        },
    })
}

/// Answer text followed by a `Sources:` list of cited URLs
fn search_text(response: &GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| ResearchError::Api("Gemini returned no candidates".to_string()))?;

    let mut text = candidate
        .content
        .iter()
        .flat_map(|c| &c.parts)
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    let citations: Vec<String> = candidate
        .grounding_metadata
        .iter()
        .flat_map(|m| &m.grounding_chunks)
        .filter_map(|chunk| chunk.web.as_ref()?.citation())
        .collect();

    if !citations.is_empty() {
        text.push_str("\n\nSources:\n");
        for citation in &citations {
            text.push_str(&format!("- {citation}\n"));
        }
    }
    Ok(text)
}

/// Decoded PCM of the first inline audio part
fn audio_pcm(response: &GenerateContentResponse) -> Result<Vec<u8>> {
    let data = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| &c.parts)
        .find_map(|p| p.inline_data.as_ref())
        .ok_or_else(|| ResearchError::Synthesis("response carried no audio".to_string()))?;

    STANDARD
        .decode(&data.data)
        .map_err(|e| ResearchError::Synthesis(format!("invalid audio payload: {e}")))
}

#[async_trait]
impl SearchProvider for GeminiClient {
    async fn search(&self, query: &str) -> Result<String> {
        let response = self.generate(&self.search_model, &search_body(query)).await?;
        let text = search_text(&response)?;
        info!(
            model = %self.search_model,
            result_length = text.len(),
            "Grounded search completed"
        );
        Ok(text)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let body = speech_body(&request.prompt, &request.speakers);
        let response = self.generate(&self.tts_model, &body).await?;
        let pcm = audio_pcm(&response)?;
        info!(
            model = %self.tts_model,
            pcm_bytes = pcm.len(),
            "Speech synthesis completed"
        );
        Ok(pcm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_search_text_with_citations() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Nvidia shipped "}, {"text": "new chips."}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://vertexaisearch.cloud.google.com/r/1", "title": "techcrunch.com"}},
                    {"web": {"uri": "https://example.org/story", "title": "Some Headline"}},
                    {"retrievedContext": {}}
                ]}
            }]
        }));

        let text = search_text(&response).unwrap();
        assert!(text.starts_with("Nvidia shipped new chips."));
        assert!(text.contains("- https://techcrunch.com\n"));
        assert!(text.contains("- https://example.org/story\n"));
    }

    #[test]
    fn test_search_text_without_candidates() {
        let response = parse(json!({"candidates": []}));
        assert!(matches!(search_text(&response), Err(ResearchError::Api(_))));
    }

    #[test]
    fn test_audio_pcm_decodes_inline_data() {
        let encoded = STANDARD.encode([1u8, 2, 3, 4]);
        let response = parse(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "audio/L16;rate=24000", "data": encoded}}
            ]}}]
        }));
        assert_eq!(audio_pcm(&response).unwrap(), vec![1, 2, 3, 4]);

        let empty = parse(json!({"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}));
        assert!(matches!(audio_pcm(&empty), Err(ResearchError::Synthesis(_))));
    }

    #[test]
    fn test_speech_body_voices() {
        let body = speech_body("hello", &SpeakerVoice::podcast_hosts());
        let configs = &body["generationConfig"]["speechConfig"]["multiSpeakerVoiceConfig"]
            ["speakerVoiceConfigs"];
        assert_eq!(configs[0]["speaker"], "Joe");
        assert_eq!(
            configs[0]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Kore"
        );
        assert_eq!(configs[1]["speaker"], "Jane");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "AUDIO");
    }

    #[test]
    fn test_client_requires_key() {
        assert!(GeminiClient::new(&ResearchConfig::default()).is_err());

        let config = ResearchConfig::builder()
            .gemini_api_key("k")
            .gemini_base_url("http://localhost:9/v1beta/")
            .build()
            .unwrap();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/v1beta");
    }

    #[tokio::test]
    #[ignore] // Requires network access and GEMINI_API_KEY
    async fn test_live_search() {
        let config = ResearchConfig::default().with_env();
        let client = GeminiClient::new(&config).unwrap();
        let text = client.search("latest AI chip news").await.unwrap();
        assert!(!text.is_empty());
    }
}
