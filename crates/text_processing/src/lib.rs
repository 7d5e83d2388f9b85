//! Normalization core for the meeting parser
//!
//! This crate provides the deterministic, rule-based transforms that turn
//! noisy Hindi / English / Hinglish fragments into canonical values:
//! - **Script detection**: Devanagari vs pure Latin classification
//! - **Name resolution**: cleaning, Devanagari→Roman transliteration,
//!   spelling correction against curated name tables
//! - **Date resolution**: relative and absolute phrases → `dd-mm-yyyy`
//! - **Time normalization**: hour tokens + utterance context → `H:MM AM|PM`
//! - **Hindi number words**: shared lookup used by the date resolver
//!
//! Every public function here is total: malformed input degrades to an
//! empty string, never a panic or an error. Rule tables are immutable data
//! injected into each resolver so they stay testable and swappable per
//! locale.

pub mod dates;
pub mod hindi;
pub mod names;
pub mod script;
pub mod times;
pub mod translit;

pub use dates::{DateResolver, DateRules};
pub use names::{NameLexicon, NameResolver};
pub use script::{contains_devanagari, is_pure_latin};
pub use times::{TimeNormalizer, TimeRangePolicy, TimeRules};
pub use translit::Transliterator;
