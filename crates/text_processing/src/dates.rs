//! Date phrase resolution
//!
//! Maps a date phrase (relative or absolute, Devanagari or Roman, with the
//! token spellings meeting requests actually use) to an absolute calendar
//! date in canonical `dd-mm-yyyy` form. Resolution rules are tried in a
//! fixed order and the first match wins, so a weekday name can never be
//! shadowed by a coincidental absolute-date match. Unresolvable phrases
//! yield an empty string, never a guessed date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::hindi::day_word_to_number;

static TODAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(aaj|today|आज)\b").unwrap());
static DAY_AFTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(parso|parson|day\s+after\s+tomorrow|परसों)\b").unwrap());
static TOMORROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(kal|tomorrow|कल)\b").unwrap());
static NEXT_MODIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(next|agle|agla|आगले)\b").unwrap());
static AFTER_DAYS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:after|आफ्टर|baad|बाद)\s+(\w+)\s+(?:days?|din|दिन|डेज)\b").unwrap()
});
// Hindi word order: "do din baad"
static DAYS_AFTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+)\s+(?:din|दिन|days?)\s+(?:baad|बाद)\b").unwrap());
static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(next|this|coming|agle|agla|आगले)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday|somwar|mangalwar|mangal|budhwar|budh|guruwar|guru|shukravar|shukrawar|shukra|shaniwar|shani|raviwar|ravi)\b",
    )
    .unwrap()
});
static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*(?:\s+(\d{4}))?")
        .unwrap()
});
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{2,4})\b").unwrap());

/// Alias and qualifier tables for date normalization.
///
/// Month aliases translate Hindi month names (including the regional typo
/// variants ASR produces) and long English names into the three-letter
/// tokens the matcher works with; weekday aliases do the same for
/// Devanagari weekday names. Qualifier words are time-of-day noise that is
/// irrelevant to date parsing.
#[derive(Debug, Clone)]
pub struct DateRules {
    pub month_aliases: Vec<(String, String)>,
    pub weekday_aliases: Vec<(String, String)>,
    pub qualifier_words: Vec<String>,
    /// Forward booking horizon for `is_valid`, in days
    pub horizon_days: i64,
}

impl Default for DateRules {
    fn default() -> Self {
        let month_aliases = [
            ("january", "jan"),
            ("february", "feb"),
            ("march", "mar"),
            ("april", "apr"),
            ("june", "jun"),
            ("july", "jul"),
            ("august", "aug"),
            ("september", "sep"),
            ("october", "oct"),
            ("november", "nov"),
            ("december", "dec"),
            ("जनवरी", "jan"),
            ("फ़रवरी", "feb"),
            ("फरवरी", "feb"),
            ("मार्च", "mar"),
            ("अप्रैल", "apr"),
            ("मई", "may"),
            ("जून", "jun"),
            ("जुलाई", "jul"),
            ("अगस्त", "aug"),
            ("सितंबर", "sep"),
            ("अक्टूबर", "oct"),
            ("नवंबर", "nov"),
            ("दिसंबर", "dec"),
            ("दिसमबर", "dec"),
        ];
        let weekday_aliases = [
            ("सोमवार", "monday"),
            ("मंगलवार", "tuesday"),
            ("बुधवार", "wednesday"),
            ("गुरुवार", "thursday"),
            ("शुक्रवार", "friday"),
            ("शनिवार", "saturday"),
            ("रविवार", "sunday"),
        ];
        let qualifier_words = [
            "morning", "subah", "savere", "सुबह", "afternoon", "dopahar", "दोपहर", "evening",
            "shaam", "sham", "शाम", "night", "raat", "रात", "baje", "बजे", "ko", "को",
        ];

        Self {
            month_aliases: month_aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            weekday_aliases: weekday_aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            qualifier_words: qualifier_words.iter().map(|s| s.to_string()).collect(),
            horizon_days: 365,
        }
    }
}

/// Resolves date phrases against an injected rule table.
#[derive(Debug, Clone)]
pub struct DateResolver {
    rules: DateRules,
    alias_patterns: Vec<(Regex, String)>,
    qualifier_pattern: Regex,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(DateRules::default())
    }
}

impl DateResolver {
    pub fn new(rules: DateRules) -> Self {
        let alias_patterns = rules
            .month_aliases
            .iter()
            .chain(rules.weekday_aliases.iter())
            .map(|(from, to)| {
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(from))).unwrap();
                (pattern, to.clone())
            })
            .collect();

        let qualifier_alternation = rules
            .qualifier_words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let qualifier_pattern =
            Regex::new(&format!(r"\b(?:{})\b", qualifier_alternation)).unwrap();

        Self {
            rules,
            alias_patterns,
            qualifier_pattern,
        }
    }

    /// Resolve a date phrase to canonical `dd-mm-yyyy`, or empty.
    pub fn resolve(&self, phrase: &str, today: NaiveDate) -> String {
        if phrase.trim().is_empty() {
            return String::new();
        }

        let input = self.normalize(phrase);

        // Literal keywords. Day-after must run before tomorrow: the English
        // "day after tomorrow" contains the word "tomorrow".
        if TODAY_RE.is_match(&input) {
            return format(today);
        }
        if DAY_AFTER_RE.is_match(&input) {
            return format(today + Duration::days(2));
        }
        if TOMORROW_RE.is_match(&input) {
            // "agle kal" is the day after the immediate next day
            let days = if NEXT_MODIFIER_RE.is_match(&input) {
                2
            } else {
                1
            };
            return format(today + Duration::days(days));
        }

        // "after N days" / "N din baad"
        for re in [&*AFTER_DAYS_RE, &*DAYS_AFTER_RE] {
            if let Some(caps) = re.captures(&input) {
                if let Some(days) = day_word_to_number(&caps[1]) {
                    tracing::debug!(phrase = %phrase, days, "resolved relative day offset");
                    return format(today + Duration::days(i64::from(days)));
                }
            }
        }

        // Weekday, optionally with a next/this/coming modifier. Checked
        // before absolute dates so a weekday name is never shadowed.
        if let Some(caps) = WEEKDAY_RE.captures(&input) {
            if let Some(target) = map_weekday(&caps[2]) {
                let is_next = NEXT_MODIFIER_RE.is_match(&input);
                let is_this_week =
                    input.contains("this") || input.contains("coming");
                return format(next_weekday(today, target, is_next, is_this_week));
            }
        }

        // Absolute "D month [YYYY]"
        if let Some(caps) = DAY_MONTH_RE.captures(&input) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = month_number(&caps[2]);
            let year: Option<i32> = caps.get(3).and_then(|y| y.as_str().parse().ok());

            let resolved = match year {
                Some(y) => NaiveDate::from_ymd_opt(y, month, day),
                None => NaiveDate::from_ymd_opt(today.year(), month, day).map(|date| {
                    if date < today {
                        // Roll forward: "5 jan" said in December means next year
                        NaiveDate::from_ymd_opt(today.year() + 1, month, day).unwrap_or(date)
                    } else {
                        date
                    }
                }),
            };

            if let Some(date) = resolved {
                return format(date);
            }
            // Impossible dates (31 Feb) fall through and resolve to empty
        }

        // Numeric d/m/y, d-m-y, d.m.y; 2-digit years are in the 2000s
        if let Some(caps) = NUMERIC_RE.captures(&input) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year_str = &caps[3];
            let year: Option<i32> = match year_str.len() {
                2 => year_str.parse::<i32>().ok().map(|y| y + 2000),
                4 => year_str.parse().ok(),
                _ => None,
            };
            if let Some(y) = year {
                if let Some(date) = NaiveDate::from_ymd_opt(y, month, day) {
                    return format(date);
                }
            }
        }

        String::new()
    }

    /// True if `value` parses as canonical `dd-mm-yyyy` and falls inside
    /// `[today, today + horizon]`.
    pub fn is_valid(&self, value: &str, today: NaiveDate) -> bool {
        match NaiveDate::parse_from_str(value, "%d-%m-%Y") {
            Ok(date) => {
                date >= today && date <= today + Duration::days(self.rules.horizon_days)
            }
            Err(_) => false,
        }
    }

    /// Lowercase, translate month/weekday aliases, strip time-of-day noise.
    fn normalize(&self, phrase: &str) -> String {
        let mut input = phrase.trim().to_lowercase();
        for (pattern, replacement) in &self.alias_patterns {
            input = pattern.replace_all(&input, replacement.as_str()).into_owned();
        }
        self.qualifier_pattern.replace_all(&input, " ").into_owned()
    }
}

fn format(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn month_number(token: &str) -> u32 {
    match token {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}

fn map_weekday(token: &str) -> Option<Weekday> {
    Some(match token {
        "monday" | "somwar" => Weekday::Mon,
        "tuesday" | "mangalwar" | "mangal" => Weekday::Tue,
        "wednesday" | "budhwar" | "budh" => Weekday::Wed,
        "thursday" | "guruwar" | "guru" => Weekday::Thu,
        "friday" | "shukravar" | "shukrawar" | "shukra" => Weekday::Fri,
        "saturday" | "shaniwar" | "shani" => Weekday::Sat,
        "sunday" | "raviwar" | "ravi" => Weekday::Sun,
        _ => return None,
    })
}

/// Day-offset policy for weekday phrases.
///
/// Offset 0 (today is the named day): "this"/"coming" keep today, anything
/// else moves a full week out. A "next" modifier always advances a further
/// week, so "next friday" spoken on a Friday lands 14 days out and spoken
/// on a Thursday lands 8 days out.
fn next_weekday(today: NaiveDate, target: Weekday, is_next: bool, allow_today: bool) -> NaiveDate {
    let mut offset = (i64::from(target.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday()))
    .rem_euclid(7);

    if offset == 0 && !allow_today {
        offset = 7;
    }
    if is_next {
        offset += 7;
    }

    today + Duration::days(offset)
}
