//! Field validation
//!
//! Checks normalized fields against the booking rules and produces the
//! user-facing error list. Runs after normalization, so every check here
//! sees canonical values: Roman names, `dd-mm-yyyy` dates, `H:MM AM|PM`
//! times.

use chrono::NaiveDate;
use meeting_config::PipelineConfig;
use meeting_core::{MeetingFields, ValidationOutcome};
use meeting_text_processing::{DateResolver, DateRules, TimeRangePolicy};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,}(?: [A-Za-z]+)*$").unwrap());
static MOBILE_FORMAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());

/// Booking-rule validator.
#[derive(Debug, Clone)]
pub struct Validator {
    require_mobile: bool,
    dates: DateResolver,
    range: TimeRangePolicy,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl Validator {
    pub fn new(config: &PipelineConfig) -> Self {
        let rules = DateRules {
            horizon_days: config.date_horizon_days,
            ..DateRules::default()
        };
        Self {
            require_mobile: config.require_mobile,
            dates: DateResolver::new(rules),
            range: TimeRangePolicy {
                min_minutes: config.min_duration_minutes,
                max_minutes: config.max_duration_hours * 60,
            },
        }
    }

    pub fn validate(&self, fields: &MeetingFields, today: NaiveDate) -> ValidationOutcome {
        let mut errors = Vec::new();

        if fields.client_name.is_empty() {
            errors.push("Client name missing".to_string());
        } else if !NAME_FORMAT_RE.is_match(&fields.client_name) {
            errors.push("Invalid client name format".to_string());
        }

        if fields.mobile_number.is_empty() {
            if self.require_mobile {
                errors.push("Mobile number missing".to_string());
            }
        } else if !MOBILE_FORMAT_RE.is_match(&fields.mobile_number) {
            errors.push("Invalid mobile number".to_string());
        }

        if fields.meeting_date.is_empty() {
            errors.push("Meeting date missing".to_string());
        } else if !self.dates.is_valid(&fields.meeting_date, today) {
            errors.push("Invalid meeting date".to_string());
        }

        if fields.start_time.is_empty() {
            errors.push("Start time missing".to_string());
        }
        if fields.end_time.is_empty() {
            errors.push("End time missing".to_string());
        }
        if !fields.start_time.is_empty()
            && !fields.end_time.is_empty()
            && !self.range.is_valid_range(&fields.start_time, &fields.end_time)
        {
            errors.push("Invalid time range".to_string());
        }

        ValidationOutcome::from_errors(errors)
    }
}
