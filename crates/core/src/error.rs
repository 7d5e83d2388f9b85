//! Error types shared across the workspace
//!
//! The normalization core itself never fails: resolvers return the empty
//! string when a value cannot be determined. These errors only occur at the
//! collaborator boundary (extraction service, transcription service).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Extraction service error: {0}")]
    Extraction(String),

    #[error("Extraction service timed out after {0}s")]
    ExtractionTimeout(u64),

    #[error("Transcription service error: {0}")]
    Transcription(String),

    #[error("Malformed extraction payload: {0}")]
    MalformedPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
