//! End-to-end pipeline tests with extractor test doubles.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use meeting_config::PipelineConfig;
use meeting_core::{Error, MeetingExtractor, MeetingFields, Result};
use meeting_pipeline::MeetingPipeline;

/// Extractor that always returns the same draft record
struct FixedExtractor(MeetingFields);

#[async_trait]
impl MeetingExtractor for FixedExtractor {
    async fn extract(&self, _utterance: &str) -> Result<MeetingFields> {
        Ok(self.0.clone())
    }
}

/// Extractor that fails like an unreachable upstream
struct FailingExtractor;

#[async_trait]
impl MeetingExtractor for FailingExtractor {
    async fn extract(&self, _utterance: &str) -> Result<MeetingFields> {
        Err(Error::Extraction("upstream unavailable".to_string()))
    }
}

/// Extractor that never answers inside the pipeline timeout
struct SlowExtractor;

#[async_trait]
impl MeetingExtractor for SlowExtractor {
    async fn extract(&self, _utterance: &str) -> Result<MeetingFields> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(MeetingFields::default())
    }
}

fn pipeline<E: MeetingExtractor>(extractor: E) -> MeetingPipeline<E> {
    MeetingPipeline::new(extractor, &PipelineConfig::default(), Duration::from_secs(5))
}

/// 2025-01-10 is a Friday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[tokio::test]
async fn hindi_utterance_parses_via_fallback_alone() {
    let p = pipeline(FailingExtractor);
    let outcome = p
        .parse_as_of("कल शाम को रितेश वरमा के साथ 5 se 6 मीटिंग रखनी है", today())
        .await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.fields.client_name, "Ritesh Verma");
    assert_eq!(outcome.fields.meeting_date, "11-01-2025");
    assert_eq!(outcome.fields.start_time, "5:00 PM");
    assert_eq!(outcome.fields.end_time, "6:00 PM");
    assert_eq!(outcome.fields.mobile_number, "");
}

#[tokio::test]
async fn english_utterance_with_next_weekday() {
    let p = pipeline(FailingExtractor);
    let outcome = p
        .parse_as_of(
            "schedule a meeting with John Doe next friday from 10 am to 11 am",
            today(),
        )
        .await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.fields.client_name, "John Doe");
    // Spoken on a Friday, "next friday" is two weeks out
    assert_eq!(outcome.fields.meeting_date, "24-01-2025");
    assert_eq!(outcome.fields.start_time, "10:00 AM");
    assert_eq!(outcome.fields.end_time, "11:00 AM");
}

#[tokio::test]
async fn partial_record_reports_missing_pieces() {
    let p = pipeline(FailingExtractor);
    let outcome = p
        .parse_as_of("parso subah 4 baje Anushka ke saath meeting", today())
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.fields.client_name, "Anushka");
    assert_eq!(outcome.fields.meeting_date, "12-01-2025");
    assert_eq!(outcome.fields.start_time, "4:00 AM");
    assert_eq!(outcome.errors, vec!["End time missing"]);
}

#[tokio::test]
async fn extractor_draft_is_normalized() {
    let draft = MeetingFields {
        client_name: "रितेश वरमा".to_string(),
        mobile_number: "+91 98765 43210".to_string(),
        meeting_date: "kal".to_string(),
        start_time: "5".to_string(),
        end_time: "6".to_string(),
    };
    let p = pipeline(FixedExtractor(draft));
    let outcome = p
        .parse_as_of("कल शाम को रितेश वरमा के साथ मीटिंग, नंबर 98765 43210", today())
        .await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.fields.client_name, "Ritesh Verma");
    assert_eq!(outcome.fields.mobile_number, "9876543210");
    assert_eq!(outcome.fields.meeting_date, "11-01-2025");
    assert_eq!(outcome.fields.start_time, "5:00 PM");
    assert_eq!(outcome.fields.end_time, "6:00 PM");
}

#[tokio::test]
async fn slow_extractor_falls_back() {
    let p = MeetingPipeline::new(
        SlowExtractor,
        &PipelineConfig::default(),
        Duration::from_millis(50),
    );
    let outcome = p
        .parse_as_of("meeting with Priya Sharma kal shaam 5 se 6", today())
        .await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.fields.client_name, "Priya Sharma");
    assert_eq!(outcome.fields.meeting_date, "11-01-2025");
    assert_eq!(outcome.fields.start_time, "5:00 PM");
    assert_eq!(outcome.fields.end_time, "6:00 PM");
}

#[tokio::test]
async fn identical_extracted_times_yield_to_the_utterance_range() {
    // The draft's start/end pair is a duplication artifact; the utterance
    // carries the real range and the fallback's reading must win
    let draft = MeetingFields {
        start_time: "5".to_string(),
        end_time: "5".to_string(),
        ..Default::default()
    };
    let p = pipeline(FixedExtractor(draft));
    let outcome = p
        .parse_as_of("Priya ke saath kal shaam 5 se 6 meeting", today())
        .await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.fields.client_name, "Priya");
    assert_eq!(outcome.fields.meeting_date, "11-01-2025");
    assert_eq!(outcome.fields.start_time, "5:00 PM");
    assert_eq!(outcome.fields.end_time, "6:00 PM");
}

#[tokio::test]
async fn identical_extracted_times_drop_the_end() {
    let draft = MeetingFields {
        client_name: "Priya".to_string(),
        meeting_date: "kal".to_string(),
        start_time: "5:00 PM".to_string(),
        end_time: "5:00 PM".to_string(),
        ..Default::default()
    };
    let p = pipeline(FixedExtractor(draft));
    let outcome = p.parse_as_of("Priya se kal 5 baje meeting", today()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.fields.start_time, "5:00 PM");
    assert_eq!(outcome.fields.end_time, "");
    assert_eq!(outcome.errors, vec!["End time missing"]);
}

#[tokio::test]
async fn empty_utterance_reports_everything_missing() {
    let p = pipeline(FailingExtractor);
    let outcome = p.parse_as_of("   ", today()).await;

    assert!(!outcome.success);
    assert!(outcome.fields.is_empty());
    assert_eq!(
        outcome.errors,
        vec![
            "Client name missing",
            "Meeting date missing",
            "Start time missing",
            "End time missing",
        ]
    );
}
