//! Time normalization
//!
//! Turns a spoken time token ("5", "5:30", "17:00", "5 pm", "5 बजे") plus
//! its surrounding utterance into canonical `H:MM AM|PM` form. Meridiem
//! evidence is consulted in a fixed precedence order: an explicit marker on
//! the token itself, a 24-hour clock value, an am/pm word elsewhere in the
//! utterance, a time-of-day band word, and finally an hour-based default.

use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})(?::(\d{2}))?").unwrap());
// Bounded so "sham"/"shaam" never read as "am"
static AM_CONTEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:am|a\.m\.?)\b|एएम|ए एम").unwrap());
static PM_CONTEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:pm|p\.m\.?)\b|पीएम|पी एम").unwrap());
static TIME_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2}) (AM|PM)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Time-of-day band vocabulary, Roman and Devanagari.
#[derive(Debug, Clone)]
pub struct TimeRules {
    pub morning_words: Vec<String>,
    pub afternoon_words: Vec<String>,
    pub evening_words: Vec<String>,
    pub night_words: Vec<String>,
    /// PM hints for early-clock hours ("office ke baad 7 baje")
    pub workday_words: Vec<String>,
}

impl Default for TimeRules {
    fn default() -> Self {
        let to_owned = |words: &[&str]| words.iter().map(|s| s.to_string()).collect();
        Self {
            morning_words: to_owned(&["morning", "subah", "savere", "sawere", "सुबह", "सवेरे"]),
            afternoon_words: to_owned(&["afternoon", "noon", "lunch", "dopahar", "dopaher", "दोपहर"]),
            evening_words: to_owned(&["evening", "shaam", "sham", "शाम"]),
            night_words: to_owned(&["night", "midnight", "raat", "late", "रात", "रात्रि"]),
            workday_words: to_owned(&["office", "work", "baad", "बाद"]),
        }
    }
}

/// Normalizes clock tokens against the utterance they were spoken in.
#[derive(Debug, Clone, Default)]
pub struct TimeNormalizer {
    rules: TimeRules,
}

impl TimeNormalizer {
    pub fn new(rules: TimeRules) -> Self {
        Self { rules }
    }

    /// Normalize `token` to `H:MM AM|PM`, or empty if it holds no
    /// plausible clock value. `utterance` supplies meridiem context.
    pub fn normalize(&self, token: &str, utterance: &str) -> String {
        let Some(caps) = CLOCK_RE.captures(token) else {
            return String::new();
        };
        let hour: u32 = match caps[1].parse() {
            Ok(h) => h,
            Err(_) => return String::new(),
        };
        let minute: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        if hour > 23 || minute > 59 {
            return String::new();
        }

        // A marker spoken with the token outranks everything, but only for
        // hours it can apply to; "13 pm" still reads as a 24-hour value.
        if let Some(meridiem) = token_meridiem(token) {
            if (1..=12).contains(&hour) {
                return render(hour, minute, meridiem);
            }
        }

        // Unambiguous 24-hour values
        if hour == 0 {
            return render(12, minute, Meridiem::Am);
        }
        if hour >= 13 {
            return render(hour - 12, minute, Meridiem::Pm);
        }

        if AM_CONTEXT_RE.is_match(utterance) {
            return render(hour, minute, Meridiem::Am);
        }
        if PM_CONTEXT_RE.is_match(utterance) {
            return render(hour, minute, Meridiem::Pm);
        }

        if let Some(meridiem) = self.band_meridiem(utterance, hour) {
            return render(hour, minute, meridiem);
        }

        // No band context: 6-11 reads as morning unless the utterance
        // points at the end of the workday; 12 and 1-5 read as the
        // afternoon block meeting requests overwhelmingly mean.
        let meridiem = if (6..=11).contains(&hour) && !self.has_workday_hint(utterance) {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };
        render(hour, minute, meridiem)
    }

    /// Map a time-of-day band word in the utterance to a meridiem. Night
    /// words split on the hour: "raat 2" is 2 AM, "raat 9" is 9 PM.
    fn band_meridiem(&self, utterance: &str, hour: u32) -> Option<Meridiem> {
        let lower = utterance.to_lowercase();
        let has = |words: &[String]| words.iter().any(|w| lower.contains(w.as_str()));

        if has(&self.rules.morning_words) {
            return Some(Meridiem::Am);
        }
        if has(&self.rules.afternoon_words) || has(&self.rules.evening_words) {
            return Some(Meridiem::Pm);
        }
        if has(&self.rules.night_words) {
            return Some(if hour <= 5 || hour == 12 {
                Meridiem::Am
            } else {
                Meridiem::Pm
            });
        }
        None
    }

    fn has_workday_hint(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.rules
            .workday_words
            .iter()
            .any(|w| lower.contains(w.as_str()))
    }
}

fn token_meridiem(token: &str) -> Option<Meridiem> {
    // Strip the clock digits; whatever letters remain are the marker
    let suffix: String = token
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != ':' && *c != '.' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    match suffix.as_str() {
        "am" | "एएम" => Some(Meridiem::Am),
        "pm" | "पीएम" => Some(Meridiem::Pm),
        _ => None,
    }
}

fn render(hour: u32, minute: u32, meridiem: Meridiem) -> String {
    let suffix = match meridiem {
        Meridiem::Am => "AM",
        Meridiem::Pm => "PM",
    };
    format!("{hour}:{minute:02} {suffix}")
}

/// Minutes after midnight for a canonical `H:MM AM|PM` value.
pub fn to_minutes(value: &str) -> Option<i64> {
    let caps = TIME_VALUE_RE.captures(value)?;
    let hour: i64 = caps[1].parse().ok()?;
    let minute: i64 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour24 = match (&caps[3], hour) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        ("PM", h) => h + 12,
        _ => return None,
    };
    Some(hour24 * 60 + minute)
}

/// Duration bounds for a meeting's start/end pair.
///
/// An end at or before the start is read as crossing midnight, so an
/// identical start and end computes to a 24-hour meeting and fails the
/// upper bound rather than slipping through as zero.
#[derive(Debug, Clone, Copy)]
pub struct TimeRangePolicy {
    pub min_minutes: i64,
    pub max_minutes: i64,
}

impl Default for TimeRangePolicy {
    fn default() -> Self {
        Self {
            min_minutes: 15,
            max_minutes: 12 * 60,
        }
    }
}

impl TimeRangePolicy {
    /// Duration of the range in minutes, if both endpoints are canonical.
    pub fn duration_minutes(&self, start: &str, end: &str) -> Option<i64> {
        let start = to_minutes(start)?;
        let end = to_minutes(end)?;
        let mut duration = end - start;
        if duration <= 0 {
            duration += 24 * 60;
        }
        Some(duration)
    }

    pub fn is_valid_range(&self, start: &str, end: &str) -> bool {
        match self.duration_minutes(start, end) {
            Some(duration) => (self.min_minutes..=self.max_minutes).contains(&duration),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(token: &str, utterance: &str) -> String {
        TimeNormalizer::default().normalize(token, utterance)
    }

    #[test]
    fn token_meridiem_wins() {
        assert_eq!(normalize("5 pm", "subah 5 pm"), "5:00 PM");
        assert_eq!(normalize("5am", "shaam 5am"), "5:00 AM");
        assert_eq!(normalize("7:30 PM", ""), "7:30 PM");
    }

    #[test]
    fn twenty_four_hour_values() {
        assert_eq!(normalize("17:00", ""), "5:00 PM");
        assert_eq!(normalize("13", ""), "1:00 PM");
        assert_eq!(normalize("0:30", ""), "12:30 AM");
        // A meridiem cannot apply to a 24-hour value
        assert_eq!(normalize("13 pm", ""), "1:00 PM");
    }

    #[test]
    fn context_meridiem_words() {
        assert_eq!(normalize("5", "meeting at 5 in the am please"), "5:00 AM");
        assert_eq!(normalize("5", "5 बजे पीएम"), "5:00 PM");
        // "shaam" must not read as a context "am"
        assert_eq!(normalize("5", "shaam ko 5 baje"), "5:00 PM");
    }

    #[test]
    fn band_words() {
        assert_eq!(normalize("5", "shaam 5 baje"), "5:00 PM");
        assert_eq!(normalize("4", "subah 4 baje"), "4:00 AM");
        assert_eq!(normalize("3", "dopahar 3 baje"), "3:00 PM");
        assert_eq!(normalize("3", "दोपहर तीन बजे meeting at 3"), "3:00 PM");
    }

    #[test]
    fn night_band_splits_on_hour() {
        assert_eq!(normalize("9", "raat 9 baje"), "9:00 PM");
        assert_eq!(normalize("2", "late night at 2"), "2:00 AM");
        assert_eq!(normalize("12", "raat 12 baje"), "12:00 AM");
    }

    #[test]
    fn hour_defaults_without_context() {
        assert_eq!(normalize("9", "meeting at 9"), "9:00 AM");
        assert_eq!(normalize("11", ""), "11:00 AM");
        assert_eq!(normalize("3", "meeting at 3"), "3:00 PM");
        assert_eq!(normalize("12", ""), "12:00 PM");
    }

    #[test]
    fn workday_hint_flips_early_hours() {
        assert_eq!(normalize("7", "office ke baad 7 baje"), "7:00 PM");
        assert_eq!(normalize("7", "7 baje milte hain"), "7:00 AM");
    }

    #[test]
    fn invalid_tokens_normalize_to_empty() {
        assert_eq!(normalize("", ""), "");
        assert_eq!(normalize("baje", ""), "");
        assert_eq!(normalize("25", ""), "");
        assert_eq!(normalize("5:75", ""), "");
    }

    #[test]
    fn minutes_after_midnight() {
        assert_eq!(to_minutes("12:00 AM"), Some(0));
        assert_eq!(to_minutes("12:30 PM"), Some(750));
        assert_eq!(to_minutes("5:00 PM"), Some(1020));
        assert_eq!(to_minutes("17:00"), None);
        assert_eq!(to_minutes(""), None);
    }

    #[test]
    fn range_duration_bounds() {
        let policy = TimeRangePolicy::default();
        assert!(policy.is_valid_range("5:00 PM", "6:00 PM"));
        assert!(policy.is_valid_range("9:00 AM", "9:00 PM"));
        assert!(!policy.is_valid_range("9:00 AM", "9:05 AM"));
        assert!(!policy.is_valid_range("9:00 AM", "10:00 PM"));
    }

    #[test]
    fn midnight_crossing_counts_forward() {
        let policy = TimeRangePolicy::default();
        assert!(policy.is_valid_range("11:00 PM", "1:00 AM"));
        // Identical endpoints read as a full day, not zero
        assert!(!policy.is_valid_range("5:00 PM", "5:00 PM"));
    }

    #[test]
    fn invalid_endpoints_fail() {
        let policy = TimeRangePolicy::default();
        assert!(!policy.is_valid_range("", "6:00 PM"));
        assert!(!policy.is_valid_range("5:00 PM", "whenever"));
    }
}
