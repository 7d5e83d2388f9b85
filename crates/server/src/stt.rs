//! Speech-to-text proxy
//!
//! Forwards uploaded audio to a Whisper-compatible transcriptions endpoint
//! and returns the raw transcript. The client's language is passed as a
//! hint; mixed Hindi/English speech comes back in whichever script the
//! model chose, which is exactly what the parsing pipeline expects.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use meeting_config::TranscriptionConfig;
use meeting_core::{Error, Result, Transcriber};

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Whisper-compatible transcription collaborator.
pub struct WhisperTranscriber {
    client: reqwest::Client,
    config: TranscriptionConfig,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriptionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| Error::Transcription(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone())
            .text("temperature", "0")
            .text("response_format", "json");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transcription("request timed out".to_string())
                } else {
                    Error::Transcription(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "transcription request rejected");
            return Err(Error::Transcription(format!("{status}: {detail}")));
        }

        let payload: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Transcription(e.to_string()))?;
        Ok(payload.text)
    }
}

/// Content type for an uploaded audio file, by extension. Unknown
/// extensions fall back to the generic octet stream, which Whisper
/// endpoints accept.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "ogg" | "opus" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}
