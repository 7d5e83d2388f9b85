//! Pipeline orchestrator
//!
//! Runs the extract → fallback → normalize → validate sequence for one
//! utterance. The extractor sits behind a timeout and every failure mode
//! degrades to the regex fallback, so the pipeline itself is infallible:
//! the only "failure" a caller sees is a record with validation errors.

use std::time::Duration;

use chrono::NaiveDate;
use meeting_config::PipelineConfig;
use meeting_core::{MeetingExtractor, MeetingFields, ParseOutcome};
use meeting_text_processing::{
    contains_devanagari, DateResolver, DateRules, NameResolver, TimeNormalizer,
};

use crate::fallback::{normalize_mobile, FallbackExtractor};
use crate::validator::Validator;

// Placeholder strings LLMs emit for fields they could not fill
const NULL_MARKERS: &[&str] = &["null", "none", "n/a", "na", "unknown", "-"];

pub struct MeetingPipeline<E> {
    extractor: E,
    fallback: FallbackExtractor,
    names: NameResolver,
    dates: DateResolver,
    times: TimeNormalizer,
    validator: Validator,
    extraction_timeout: Duration,
}

impl<E: MeetingExtractor> MeetingPipeline<E> {
    pub fn new(extractor: E, config: &PipelineConfig, extraction_timeout: Duration) -> Self {
        let date_rules = DateRules {
            horizon_days: config.date_horizon_days,
            ..DateRules::default()
        };
        Self {
            extractor,
            fallback: FallbackExtractor::new(),
            names: NameResolver::default(),
            dates: DateResolver::new(date_rules),
            times: TimeNormalizer::default(),
            validator: Validator::new(config),
            extraction_timeout,
        }
    }

    /// Parse an utterance against the current local date.
    pub async fn parse(&self, utterance: &str) -> ParseOutcome {
        self.parse_as_of(utterance, chrono::Local::now().date_naive())
            .await
    }

    /// Parse with an explicit "today", so relative dates are deterministic.
    pub async fn parse_as_of(&self, utterance: &str, today: NaiveDate) -> ParseOutcome {
        let utterance = utterance.trim();

        let extracted = match tokio::time::timeout(
            self.extraction_timeout,
            self.extractor.extract(utterance),
        )
        .await
        {
            Ok(Ok(fields)) => fields,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "extractor failed, continuing with fallback");
                MeetingFields::default()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.extraction_timeout.as_secs(),
                    "extractor timed out, continuing with fallback"
                );
                MeetingFields::default()
            }
        };

        let merged = merge(extracted, self.fallback.extract(utterance));
        let fields = self.normalize(merged, utterance, today);

        let outcome = self.validator.validate(&fields, today);
        if !outcome.is_valid {
            tracing::info!(errors = ?outcome.errors, "record incomplete");
        }

        ParseOutcome {
            success: outcome.is_valid,
            fields,
            errors: outcome.errors,
        }
    }

    fn normalize(&self, raw: MeetingFields, utterance: &str, today: NaiveDate) -> MeetingFields {
        let has_devanagari = contains_devanagari(utterance);

        let client_name = self.names.resolve(&raw.client_name, has_devanagari);

        let mobile_number = if raw.mobile_number.is_empty() {
            String::new()
        } else {
            normalize_mobile(&raw.mobile_number)
        };

        // The resolver searches within its input, so when the extractor's
        // phrase does not resolve the whole utterance is worth a try.
        let mut meeting_date = self.dates.resolve(&raw.meeting_date, today);
        if meeting_date.is_empty() {
            meeting_date = self.dates.resolve(utterance, today);
        }

        let start_time = self.times.normalize(&raw.start_time, utterance);
        let mut end_time = self.times.normalize(&raw.end_time, utterance);
        // An end equal to the start is an extraction artifact, not a
        // zero-length meeting; drop it so the caller re-prompts for it
        if !end_time.is_empty() && end_time == start_time {
            end_time = String::new();
        }

        MeetingFields {
            client_name,
            mobile_number,
            meeting_date,
            start_time,
            end_time,
        }
    }
}

/// Field-wise merge, preferring the extractor's value when it carries one.
/// A non-empty extracted time pair with identical endpoints is implausible
/// and yields to the fallback's reading of the utterance instead.
fn merge(extracted: MeetingFields, fallback: MeetingFields) -> MeetingFields {
    let pick = |primary: String, secondary: String| {
        let primary = sanitize(primary);
        if primary.is_empty() {
            secondary
        } else {
            primary
        }
    };

    let start = sanitize(extracted.start_time);
    let end = sanitize(extracted.end_time);
    let (start_time, end_time) =
        if !start.is_empty() && start == end && !fallback.start_time.is_empty() {
            (fallback.start_time, fallback.end_time)
        } else {
            (
                pick(start, fallback.start_time),
                pick(end, fallback.end_time),
            )
        };

    MeetingFields {
        client_name: pick(extracted.client_name, fallback.client_name),
        mobile_number: pick(extracted.mobile_number, fallback.mobile_number),
        meeting_date: pick(extracted.meeting_date, fallback.meeting_date),
        start_time,
        end_time,
    }
}

fn sanitize(value: String) -> String {
    let trimmed = value.trim();
    if NULL_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_extractor_values() {
        let extracted = MeetingFields {
            client_name: "Ritesh".to_string(),
            meeting_date: "kal".to_string(),
            ..Default::default()
        };
        let fallback = MeetingFields {
            client_name: "someone else".to_string(),
            start_time: "5".to_string(),
            ..Default::default()
        };
        let merged = merge(extracted, fallback);
        assert_eq!(merged.client_name, "Ritesh");
        assert_eq!(merged.meeting_date, "kal");
        assert_eq!(merged.start_time, "5");
    }

    #[test]
    fn implausible_identical_pair_yields_to_fallback() {
        let extracted = MeetingFields {
            start_time: "5".to_string(),
            end_time: "5".to_string(),
            ..Default::default()
        };
        let fallback = MeetingFields {
            start_time: "5".to_string(),
            end_time: "6".to_string(),
            ..Default::default()
        };
        let merged = merge(extracted, fallback);
        assert_eq!(merged.start_time, "5");
        assert_eq!(merged.end_time, "6");
    }

    #[test]
    fn identical_pair_survives_when_fallback_heard_nothing() {
        let extracted = MeetingFields {
            start_time: "5".to_string(),
            end_time: "5".to_string(),
            ..Default::default()
        };
        let merged = merge(extracted, MeetingFields::default());
        assert_eq!(merged.start_time, "5");
        assert_eq!(merged.end_time, "5");
    }

    #[test]
    fn null_markers_count_as_empty() {
        let extracted = MeetingFields {
            client_name: "null".to_string(),
            mobile_number: "N/A".to_string(),
            ..Default::default()
        };
        let fallback = MeetingFields {
            client_name: "Priya".to_string(),
            ..Default::default()
        };
        let merged = merge(extracted, fallback);
        assert_eq!(merged.client_name, "Priya");
        assert_eq!(merged.mobile_number, "");
    }
}
