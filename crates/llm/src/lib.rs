//! LLM extraction collaborator
//!
//! Implements [`MeetingExtractor`](meeting_core::MeetingExtractor) against
//! any OpenAI-compatible chat completions endpoint. The model is asked for
//! strict JSON; whatever comes back is defensively unwrapped (code fences,
//! stray prose) before deserializing into the working record. Every failure
//! maps to a `meeting-core` error so the pipeline can fall back cleanly.

pub mod openai;

pub use openai::OpenAiExtractor;
