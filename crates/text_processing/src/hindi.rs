//! Hindi number-word utilities
//!
//! Shared lookup for small counts spoken in Devanagari, romanized Hindi, or
//! English. The date resolver uses this for "after N days" phrases; ASR
//! output occasionally renders English words in Devanagari (टू, ون), so
//! those variants are covered too.

/// Convert a number word (or digit string) in the 1..=7 range to its value.
///
/// Day offsets beyond a week are never produced by meeting-request phrases,
/// so anything larger resolves to `None`.
pub fn day_word_to_number(word: &str) -> Option<u32> {
    match word {
        "1" | "one" | "ek" | "एक" | "ون" => Some(1),
        "2" | "two" | "do" | "दो" | "टू" => Some(2),
        "3" | "three" | "teen" | "तीन" => Some(3),
        "4" | "four" | "char" | "चार" => Some(4),
        "5" | "five" | "panch" | "पांच" | "पाँच" => Some(5),
        "6" | "six" | "chhah" | "छह" | "छः" | "छे" => Some(6),
        "7" | "seven" | "saat" | "सात" => Some(7),
        _ => None,
    }
}
