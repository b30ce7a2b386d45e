//! Podcast audio tool: two-speaker speech synthesis into a WAV file

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::audio::{WavSpec, write_wav};
use crate::error::Result;
use crate::language::Language;
use crate::providers::{SpeakerVoice, SpeechRequest, SpeechSynthesizer};

use super::{PODCAST_TOOL, output_path, status_error};

/// File name used when the model does not pass one
pub const DEFAULT_PODCAST_FILENAME: &str = "ai_today_podcast";

/// Longest error text returned to the model
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct PodcastParams {
    podcast_script: String,
    #[serde(default = "default_filename")]
    filename: String,
}

fn default_filename() -> String {
    DEFAULT_PODCAST_FILENAME.to_string()
}

/// Saved podcast file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastFile {
    /// Full path of the WAV file
    pub path: PathBuf,
    /// Bytes of PCM audio received from the synthesizer
    pub pcm_bytes: usize,
}

/// Tool turning a Joe/Jane script into a WAV file
pub struct PodcastAudioTool {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output_dir: PathBuf,
    voices: Vec<SpeakerVoice>,
    language: Language,
}

impl PodcastAudioTool {
    /// Create a podcast tool
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        output_dir: impl Into<PathBuf>,
        voices: Vec<SpeakerVoice>,
        language: Language,
    ) -> Self {
        Self {
            synthesizer,
            output_dir: output_dir.into(),
            voices,
            language,
        }
    }

    /// Synthesis request for a script, prefixed with the language's instruction
    pub fn speech_request(&self, script: &str) -> SpeechRequest {
        SpeechRequest {
            prompt: format!("{}\n\n{script}", self.language.tts_prefix()),
            speakers: self.voices.clone(),
        }
    }

    /// Synthesize `script` and write it to `<output_dir>/<filename>.wav`
    pub async fn generate(&self, script: &str, filename: &str) -> Result<PodcastFile> {
        let path = output_path(&self.output_dir, filename, "wav")?;
        let pcm = self.synthesizer.synthesize(&self.speech_request(script)).await?;
        write_wav(&path, WavSpec::SPEECH, &pcm)?;

        Ok(PodcastFile {
            path: std::fs::canonicalize(&path).unwrap_or(path),
            pcm_bytes: pcm.len(),
        })
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[async_trait]
impl Tool for PodcastAudioTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: PodcastParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_arguments(PODCAST_TOOL, e))?;

        match self.generate(&params.podcast_script, &params.filename).await {
            Ok(file) => {
                info!(
                    path = %file.path.display(),
                    pcm_bytes = file.pcm_bytes,
                    language = %self.language,
                    "Saved podcast audio"
                );
                let path = file.path.display().to_string();
                Ok(json!({
                    "status": "success",
                    "message": format!("Successfully generated and saved podcast audio to {path}"),
                    "file_path": path,
                    "file_size": file.pcm_bytes,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Podcast audio generation failed");
                let reason = truncate_chars(&e.to_string(), MAX_ERROR_CHARS);
                Ok(status_error(format!("Audio generation failed: {reason}")))
            }
        }
    }

    fn name(&self) -> &str {
        PODCAST_TOOL
    }

    fn description(&self) -> &str {
        "Convert a conversational podcast script between Joe and Jane into \
         speech and save it as a WAV file. The '.wav' extension is added when missing."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "podcast_script": schema::string("Script with lines prefixed by 'Joe:' or 'Jane:'"),
                "filename": schema::string_with_default(
                    "Base file name for the audio",
                    DEFAULT_PODCAST_FILENAME,
                ),
            }),
            &["podcast_script"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResearchError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSpeech {
        requests: Mutex<Vec<SpeechRequest>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSpeech {
        async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(vec![0u8; 480])
        }
    }

    struct FailingSpeech;

    #[async_trait]
    impl SpeechSynthesizer for FailingSpeech {
        async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>> {
            Err(ResearchError::Synthesis("x".repeat(500)))
        }
    }

    #[tokio::test]
    async fn test_generates_wav_with_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(FakeSpeech::default());
        let tool = PodcastAudioTool::new(
            speech.clone(),
            dir.path(),
            SpeakerVoice::podcast_hosts(),
            Language::English,
        );

        let result = tool
            .execute(json!({"podcast_script": "Joe: Hi.\nJane: Hello."}))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(result["file_size"], 480);
        assert!(result["file_path"].as_str().unwrap().ends_with("ai_today_podcast.wav"));

        let bytes = std::fs::read(dir.path().join("ai_today_podcast.wav")).unwrap();
        assert_eq!(bytes.len(), 44 + 480);
        assert_eq!(&bytes[0..4], b"RIFF");

        let requests = speech.requests.lock().unwrap();
        assert!(requests[0].prompt.starts_with("TTS the following conversation"));
        assert!(requests[0].prompt.ends_with("\n\nJoe: Hi.\nJane: Hello."));
        assert_eq!(requests[0].speakers[1].voice, "Puck");
    }

    #[tokio::test]
    async fn test_spanish_prompt_and_explicit_name() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(FakeSpeech::default());
        let tool = PodcastAudioTool::new(
            speech.clone(),
            dir.path(),
            SpeakerVoice::podcast_hosts(),
            Language::Spanish,
        );

        tool.execute(json!({"podcast_script": "Joe: Hola.", "filename": "episodio.wav"}))
            .await
            .unwrap();

        assert!(dir.path().join("episodio.wav").exists());
        let requests = speech.requests.lock().unwrap();
        assert!(requests[0].prompt.starts_with("Convierte a audio en español"));
    }

    #[tokio::test]
    async fn test_failure_message_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let tool = PodcastAudioTool::new(
            Arc::new(FailingSpeech),
            dir.path(),
            SpeakerVoice::podcast_hosts(),
            Language::English,
        );

        let result = tool.execute(json!({"podcast_script": "Joe: Hi."})).await.unwrap();

        assert_eq!(result["status"], "error");
        let message = result["message"].as_str().unwrap();
        assert!(message.starts_with("Audio generation failed: "));
        assert_eq!(
            message.chars().count(),
            "Audio generation failed: ".len() + MAX_ERROR_CHARS
        );
        assert!(!dir.path().join("ai_today_podcast.wav").exists());
    }
}
