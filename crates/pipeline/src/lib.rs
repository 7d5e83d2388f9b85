//! Meeting parsing pipeline
//!
//! Orchestrates the full utterance → structured record flow:
//!
//! 1. **LLM extraction** behind a timeout, via the
//!    [`MeetingExtractor`](meeting_core::MeetingExtractor) trait

//! 2. **Regex fallback** that fills any field the extractor left empty
//! 3. **Normalization** of each raw field through the resolvers in
//!    `meeting-text-processing`
//! 4. **Validation** against the booking rules, producing the error list
//!    the caller shows to the user
//!
//! The pipeline never fails outright: extractor errors degrade to the
//! fallback path and surface only as missing-field validation errors.

pub mod fallback;
pub mod orchestrator;
pub mod validator;

pub use fallback::FallbackExtractor;
pub use orchestrator::MeetingPipeline;
pub use validator::Validator;
