//! OpenAI-compatible chat extractor

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use meeting_config::ExtractorConfig;
use meeting_core::{Error, MeetingExtractor, MeetingFields, Result};

const SYSTEM_PROMPT: &str = "\
You extract meeting details from utterances spoken in Hindi, English, or a \
mix of both. Reply with a single JSON object and nothing else, with exactly \
these keys: clientName, mobileNumber, meetingDate, startTime, endTime. Copy \
each value verbatim from the utterance, including Devanagari text and \
relative words like \"kal\" or \"next friday\" - do not translate, \
transliterate, or resolve anything. Use an empty string for any detail the \
utterance does not mention. Never invent values.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Extractor backed by an OpenAI-compatible chat completions API.
pub struct OpenAiExtractor {
    client: reqwest::Client,
    config: ExtractorConfig,
}

impl OpenAiExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MeetingExtractor for OpenAiExtractor {
    async fn extract(&self, utterance: &str) -> Result<MeetingFields> {
        let body = json!({
            "model": self.config.model,
            "temperature": 0,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": utterance },
            ],
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::ExtractionTimeout(self.config.timeout_secs)
                } else {
                    Error::Extraction(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "extraction request rejected");
            return Err(Error::Extraction(format!("{status}: {detail}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedPayload(e.to_string()))?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::MalformedPayload("no choices in response".to_string()))?;

        parse_fields(content)
    }
}

/// Deserialize the model's reply, tolerating markdown code fences.
fn parse_fields(content: &str) -> Result<MeetingFields> {
    let cleaned = strip_code_fence(content);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::debug!(reply = %content, "unparseable extraction reply");
        Error::MalformedPayload(e.to_string())
    })
}

/// Models sometimes wrap JSON in ``` fences despite json_object mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_reply() {
        let reply = r#"{"clientName":"रितेश वरमा","mobileNumber":"","meetingDate":"kal","startTime":"5","endTime":"6"}"#;
        let fields = parse_fields(reply).unwrap();
        assert_eq!(fields.client_name, "रितेश वरमा");
        assert_eq!(fields.meeting_date, "kal");
        assert_eq!(fields.start_time, "5");
    }

    #[test]
    fn parses_fenced_reply() {
        let reply = "```json\n{\"clientName\":\"Priya\",\"meetingDate\":\"tomorrow\"}\n```";
        let fields = parse_fields(reply).unwrap();
        assert_eq!(fields.client_name, "Priya");
        assert_eq!(fields.meeting_date, "tomorrow");
        // Missing keys default to empty
        assert_eq!(fields.end_time, "");
    }

    #[test]
    fn prose_reply_is_malformed() {
        let err = parse_fields("Sure! The client is Priya.").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn fence_stripping() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
