//! Core traits and types for the meeting parser
//!
//! This crate provides foundational types used across all other crates:
//! - The working record refined by the normalization pipeline
//! - Validation outcome types
//! - Traits for the external collaborators (LLM extraction, speech-to-text)
//! - Error types

pub mod error;
pub mod fields;
pub mod traits;

pub use error::{Error, Result};
pub use fields::{MeetingFields, ParseOutcome, ValidationOutcome};
pub use traits::{MeetingExtractor, Transcriber};
