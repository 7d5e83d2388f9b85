//! Working record types for the meeting parser pipeline

use serde::{Deserialize, Serialize};

/// The five-field working record refined in place by the pipeline.
///
/// Every field is a plain string where empty means "unknown", never null.
/// The upstream extractor produces a first draft, the regex fallback fills
/// gaps, and the resolvers rewrite each field into its canonical form.
/// A transform either improves a field or leaves it untouched; values that
/// fail a hard invariant (malformed mobile number, out-of-horizon date)
/// are kept and flagged by validation so the caller sees what was heard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingFields {
    pub client_name: String,
    pub mobile_number: String,
    pub meeting_date: String,
    pub start_time: String,
    pub end_time: String,
}

impl MeetingFields {
    /// True when no field carries a value yet
    pub fn is_empty(&self) -> bool {
        self.client_name.is_empty()
            && self.mobile_number.is_empty()
            && self.meeting_date.is_empty()
            && self.start_time.is_empty()
            && self.end_time.is_empty()
    }
}

/// Result of validating a normalized record.
///
/// Errors are informational: the record is still returned so the caller can
/// re-prompt the user for only the missing pieces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Final pipeline output: normalized fields plus the validation verdict.
///
/// Serialized with the record under `data`, the key existing clients bind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub success: bool,
    #[serde(rename = "data")]
    pub fields: MeetingFields,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_detected() {
        assert!(MeetingFields::default().is_empty());

        let partial = MeetingFields {
            start_time: "5:00 PM".to_string(),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn outcome_validity_tracks_errors() {
        assert!(ValidationOutcome::from_errors(vec![]).is_valid);
        assert!(!ValidationOutcome::from_errors(vec!["Meeting date missing".into()]).is_valid);
    }

    #[test]
    fn fields_deserialize_from_camel_case() {
        let json = r#"{"clientName":"Rani Verma","mobileNumber":"6267304521"}"#;
        let fields: MeetingFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.client_name, "Rani Verma");
        assert_eq!(fields.mobile_number, "6267304521");
        assert!(fields.meeting_date.is_empty());
    }
}
