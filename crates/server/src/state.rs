//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use meeting_config::Settings;
use meeting_core::{Result, Transcriber};
use meeting_llm::OpenAiExtractor;
use meeting_pipeline::MeetingPipeline;

use crate::stt::WhisperTranscriber;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pipeline: Arc<MeetingPipeline<OpenAiExtractor>>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let extractor = OpenAiExtractor::new(settings.extractor.clone())?;
        let pipeline = MeetingPipeline::new(
            extractor,
            &settings.pipeline,
            Duration::from_secs(settings.extractor.timeout_secs),
        );
        let transcriber = WhisperTranscriber::new(settings.transcription.clone())?;

        Ok(Self {
            settings: Arc::new(settings),
            pipeline: Arc::new(pipeline),
            transcriber: Arc::new(transcriber),
        })
    }
}
