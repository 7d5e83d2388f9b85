//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream LLM extraction service
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Speech-to-text service
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Normalization pipeline policy knobs
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means permissive (mobile clients)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum multipart upload size in bytes (audio files)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Upstream extraction service configuration (OpenAI-compatible chat API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Chat completions endpoint
    #[serde(default = "default_extractor_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_extractor_model")]
    pub model: String,

    /// API key; read from MEETING_AGENT_EXTRACTOR__API_KEY
    #[serde(default)]
    pub api_key: String,

    /// Bounded timeout for the extraction call, in seconds
    #[serde(default = "default_extractor_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_extractor_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_extractor_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_extractor_timeout_secs() -> u64 {
    30
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_extractor_endpoint(),
            model: default_extractor_model(),
            api_key: String::new(),
            timeout_secs: default_extractor_timeout_secs(),
        }
    }
}

/// Speech-to-text service configuration (Whisper-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Transcriptions endpoint
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    /// Whisper model identifier
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// API key; read from MEETING_AGENT_TRANSCRIPTION__API_KEY
    #[serde(default)]
    pub api_key: String,

    /// Transcription language hint (Hindi-first deployments use "hi")
    #[serde(default = "default_transcription_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_transcription_endpoint() -> String {
    "https://api.groq.com/openai/v1/audio/transcriptions".to_string()
}

fn default_transcription_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_transcription_language() -> String {
    "hi".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    30
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_transcription_endpoint(),
            model: default_transcription_model(),
            api_key: String::new(),
            language: default_transcription_language(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Normalization pipeline policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Forward booking horizon for meeting dates, in days
    #[serde(default = "default_date_horizon_days")]
    pub date_horizon_days: i64,

    /// Minimum meeting duration in minutes
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: i64,

    /// Maximum meeting duration in hours (deployment policy, 12-24)
    #[serde(default = "default_max_duration_hours")]
    pub max_duration_hours: i64,

    /// Whether a mobile number is required for a valid record.
    /// When false, only the shape of a present number is checked.
    #[serde(default)]
    pub require_mobile: bool,
}

fn default_date_horizon_days() -> i64 {
    365
}

fn default_min_duration_minutes() -> i64 {
    15
}

fn default_max_duration_hours() -> i64 {
    12
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_horizon_days: default_date_horizon_days(),
            min_duration_minutes: default_min_duration_minutes(),
            max_duration_hours: default_max_duration_hours(),
            require_mobile: false,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.date_horizon_days < 1 {
            return Err(ConfigError::Invalid(
                "pipeline.date_horizon_days must be at least 1".to_string(),
            ));
        }
        if !(1..=24).contains(&self.pipeline.max_duration_hours) {
            return Err(ConfigError::Invalid(
                "pipeline.max_duration_hours must be between 1 and 24".to_string(),
            ));
        }
        if self.pipeline.min_duration_minutes < 1
            || self.pipeline.min_duration_minutes >= self.pipeline.max_duration_hours * 60
        {
            return Err(ConfigError::Invalid(
                "pipeline.min_duration_minutes must be positive and below the maximum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from config files and environment.
///
/// Priority: env vars > config/{env} > config/default > built-in defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("MEETING_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.pipeline.date_horizon_days, 365);
        assert_eq!(settings.pipeline.max_duration_hours, 12);
        assert!(!settings.pipeline.require_mobile);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.pipeline.max_duration_hours = 36;
        assert!(settings.validate().is_err());

        settings.pipeline.max_duration_hours = 12;
        settings.pipeline.min_duration_minutes = 0;
        assert!(settings.validate().is_err());
    }
}
