//! Configuration management for the meeting parser
//!
//! Supports loading configuration from:
//! - YAML/TOML files (config/default, config/{env})
//! - Environment variables (MEETING_AGENT_ prefix, `__` separator)
//!
//! Rule tables for the resolvers are NOT configured here: they are
//! immutable data owned by `meeting-text-processing` and injected into each
//! resolver at construction. This crate only carries deployment knobs.

pub mod settings;

pub use settings::{
    load_settings, ExtractorConfig, PipelineConfig, ServerConfig, Settings, TranscriptionConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    File(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
