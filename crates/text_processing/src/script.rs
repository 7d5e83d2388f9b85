//! Script detection predicates
//!
//! Two pure predicates used to pick the name-resolution path. They are not
//! exact complements: a mixed-script string returns false for both.

/// True if the text contains at least one code point in the Devanagari
/// Unicode block (U+0900..U+097F).
pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// True if the text consists solely of Latin letters and spaces.
///
/// Empty and all-whitespace strings are not "pure Latin": they carry no
/// letters at all.
pub fn is_pure_latin(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}
