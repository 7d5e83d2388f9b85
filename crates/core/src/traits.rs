//! Traits for the external collaborators
//!
//! The pipeline only depends on these seams; concrete implementations live
//! in the `meeting-llm` and `meeting-server` crates. Test doubles implement
//! them directly.

use async_trait::async_trait;

use crate::error::Result;
use crate::fields::MeetingFields;

/// Upstream extraction collaborator (LLM-backed in production).
///
/// Returns a first-draft record with the same five string fields the
/// pipeline refines. Failures and timeouts are recovered by the caller via
/// the regex fallback, never surfaced to the end user.
#[async_trait]
pub trait MeetingExtractor: Send + Sync {
    async fn extract(&self, utterance: &str) -> Result<MeetingFields>;
}

/// Speech-to-text collaborator for voice input paths.
///
/// Language auto-detection and filler-word stripping happen inside the
/// collaborator; the transcript is consumed as the raw utterance.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<String>;
}
