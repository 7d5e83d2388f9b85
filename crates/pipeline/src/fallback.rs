//! Regex fallback extraction
//!
//! Deterministic pattern matching over the raw utterance, used when the
//! LLM extractor fails, times out, or leaves fields empty. Everything here
//! produces *raw* tokens; normalization happens downstream so both the LLM
//! and fallback paths flow through the same resolvers.

use meeting_core::MeetingFields;
use once_cell::sync::Lazy;
use regex::Regex;

// Name spoken before "ke saath" (Hindi word order)
static NAME_BEFORE_SAATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"((?:[A-Za-zऀ-ॿ]+\s+){1,4})(?:के\s+साथ|ke\s+saa?th|ke\s+sath)",
    )
    .unwrap()
});
// Name spoken after "meeting with" (English word order)
static NAME_AFTER_WITH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:meeting|meet|appointment|call|मीटिंग)\s+(?:with|विद)\s+((?:[A-Za-zऀ-ॿ]+\s*){1,4})",
    )
    .unwrap()
});
// Indian mobile: optional +91/0 prefix, first digit 6-9
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?91)?0?([6-9]\d{9})\b").unwrap());
static DATE_HINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(aaj|today|kal|tomorrow|parso|parson|din|monday|tuesday|wednesday|thursday|friday|saturday|sunday|somwar|mangalwar|budhwar|guruwar|shukravar|shaniwar|raviwar|jan\w*|feb\w*|mar\w*|apr\w*|may|jun\w*|jul\w*|aug\w*|sep\w*|oct\w*|nov\w*|dec\w*)\b|आज|कल|परसों|दिन|वार|जनवरी|फरवरी|मार्च|अप्रैल|मई|जून|जुलाई|अगस्त|सितंबर|अक्टूबर|नवंबर|दिसंबर|\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}",
    )
    .unwrap()
});
// "5 se 6", "5 to 6 pm", "5:30 - 7", with the connectors ASR produces
static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}(?::\d{2})?\s*(?:am|pm|बजे)?)\s*(?:se|sa|say|to|till|tak|से|तक|-)\s*(\d{1,2}(?::\d{2})?\s*(?:am|pm|बजे)?)\b",
    )
    .unwrap()
});
static SINGLE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?::\d{2})?)\s*(?:baje|बजे|am|pm|o'?clock)").unwrap()
});
// Masked out before time matching so "22-12-2025" is never a 22-to-12 range
static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}").unwrap());

// Words that can sit next to a name capture but are never part of the name
const NAME_STOP_WORDS: &[&str] = &[
    "aaj", "kal", "parso", "parson", "today", "tomorrow", "next", "this", "coming", "subah",
    "savere", "shaam", "sham", "dopahar", "raat", "morning", "afternoon", "evening", "night",
    "baje", "ko", "se", "pe", "par", "at", "on", "am", "pm", "meeting", "meet", "appointment",
    "call", "schedule", "fix", "rakhni", "rakhna", "hai", "karni", "karna", "ek", "a", "an",
    "the", "आज", "कल", "परसों", "सुबह", "शाम", "दोपहर", "रात", "बजे", "को", "से", "पर", "मीटिंग",
    "रखनी", "रखना", "है", "करनी", "करना", "एक",
];

/// Regex-driven field extraction from the raw utterance.
#[derive(Debug, Clone, Default)]
pub struct FallbackExtractor;

impl FallbackExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract raw field tokens. Every field degrades to empty when the
    /// utterance carries no matching pattern.
    pub fn extract(&self, utterance: &str) -> MeetingFields {
        let fields = MeetingFields {
            client_name: self.extract_name(utterance),
            mobile_number: self.extract_mobile(utterance),
            meeting_date: self.extract_date_phrase(utterance),
            start_time: String::new(),
            end_time: String::new(),
        };
        let (start, end) = self.extract_times(utterance);
        let fields = MeetingFields {
            start_time: start,
            end_time: end,
            ..fields
        };
        tracing::debug!(?fields, "fallback extraction");
        fields
    }

    fn extract_name(&self, utterance: &str) -> String {
        if let Some(caps) = NAME_BEFORE_SAATH_RE.captures(utterance) {
            // The capture may drag in leading date/time words; keep the
            // trailing run of name-like words
            let words: Vec<&str> = caps[1].split_whitespace().collect();
            let tail: Vec<&str> = words
                .iter()
                .rev()
                .take_while(|w| !is_stop_word(w))
                .copied()
                .collect();
            let name: Vec<&str> = tail.into_iter().rev().collect();
            if !name.is_empty() {
                return name.join(" ");
            }
        }
        if let Some(caps) = NAME_AFTER_WITH_RE.captures(utterance) {
            // Symmetric problem on the other side: trailing words after the
            // name belong to the date/time portion
            let name: Vec<&str> = caps[1]
                .split_whitespace()
                .take_while(|w| !is_stop_word(w) && !w.chars().any(|c| c.is_ascii_digit()))
                .collect();
            if !name.is_empty() {
                return name.join(" ");
            }
        }
        String::new()
    }

    fn extract_mobile(&self, utterance: &str) -> String {
        // ASR often spells numbers in spaced groups ("98765 43210")
        let collapsed = collapse_digit_runs(utterance);
        match MOBILE_RE.captures(&collapsed) {
            Some(caps) => caps[1].to_string(),
            None => String::new(),
        }
    }

    /// The date resolver searches within its input, so the hint check only
    /// decides whether the utterance is worth handing over at all.
    fn extract_date_phrase(&self, utterance: &str) -> String {
        if DATE_HINT_RE.is_match(utterance) {
            utterance.to_string()
        } else {
            String::new()
        }
    }

    fn extract_times(&self, utterance: &str) -> (String, String) {
        let utterance = NUMERIC_DATE_RE.replace_all(utterance, " ");
        let utterance = utterance.as_ref();
        if let Some(caps) = TIME_RANGE_RE.captures(utterance) {
            let start = caps[1].trim().to_string();
            let end = caps[2].trim().to_string();
            // "5 se 5" is an ASR artifact, not a zero-length meeting
            if start != end {
                return (start, end);
            }
            return (start, String::new());
        }
        if let Some(caps) = SINGLE_TIME_RE.captures(utterance) {
            return (caps[1].trim().to_string(), String::new());
        }
        (String::new(), String::new())
    }
}

fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    NAME_STOP_WORDS.contains(&lower.as_str())
}

/// Join digit groups separated by single spaces or hyphens.
fn collapse_digit_runs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if (c == ' ' || c == '-')
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        {
            continue;
        }
        out.push(c);
    }
    out
}

/// Strip a mobile token down to its 10 significant digits where possible.
/// Tokens that cannot be reduced are returned digits-only for the
/// validator to reject with a precise error.
pub fn normalize_mobile(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 12 && digits.starts_with("91") {
        return digits[2..].to_string();
    }
    if digits.len() == 11 && digits.starts_with('0') {
        return digits[1..].to_string();
    }
    digits
}
