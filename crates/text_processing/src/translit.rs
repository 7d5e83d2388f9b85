//! Devanagari → Roman transliteration for personal names
//!
//! Character-by-character walk modelled as a small state machine instead of
//! nested lookahead conditionals, so the edge cases (end of word, conjuncts,
//! stray marks) stay enumerable. Only the vocabulary needed for Indian
//! personal names is covered; this is not a general transliteration system.

use std::collections::HashMap;

const HALANT: char = '\u{094D}';

/// Sound classes for a single Devanagari code point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Consonant(&'static str),
    /// Independent vowel letter (अ, आ, ...)
    Vowel(&'static str),
    /// Dependent vowel sign attached to a consonant
    Matra(&'static str),
    /// Virama: suppresses the inherent vowel, forms conjuncts
    Halant,
    /// Anusvara / chandrabindu, romanized "n"
    Nasal,
    /// Visarga, romanized "h"
    Visarga,
    /// Non-Devanagari letter, passed through unchanged
    OtherLetter(char),
    /// Anything else: dropped
    Other,
}

fn classify(c: char) -> CharClass {
    if let Some(sound) = consonant_sound(c) {
        return CharClass::Consonant(sound);
    }
    if let Some(sound) = vowel_sound(c) {
        return CharClass::Vowel(sound);
    }
    if let Some(sound) = matra_sound(c) {
        return CharClass::Matra(sound);
    }
    match c {
        HALANT => CharClass::Halant,
        '\u{0902}' | '\u{0901}' => CharClass::Nasal,
        '\u{0903}' => CharClass::Visarga,
        _ if c.is_alphabetic() => CharClass::OtherLetter(c),
        _ => CharClass::Other,
    }
}

fn consonant_sound(c: char) -> Option<&'static str> {
    Some(match c {
        'क' => "k",
        'ख' => "kh",
        'ग' => "g",
        'घ' => "gh",
        'ङ' => "ng",
        'च' => "ch",
        'छ' => "chh",
        'ज' => "j",
        'झ' => "jh",
        'ञ' => "ny",
        'ट' | 'त' => "t",
        'ठ' | 'थ' => "th",
        'ड' | 'द' => "d",
        'ढ' | 'ध' => "dh",
        'ण' | 'न' => "n",
        'प' => "p",
        'फ' => "ph",
        'ब' => "b",
        'भ' => "bh",
        'म' => "m",
        'य' => "y",
        'र' => "r",
        'ल' | 'ळ' => "l",
        'व' => "w",
        'श' | 'ष' => "sh",
        'स' => "s",
        'ह' => "h",
        _ => return None,
    })
}

fn vowel_sound(c: char) -> Option<&'static str> {
    Some(match c {
        'अ' => "a",
        'आ' => "aa",
        'इ' => "i",
        'ई' => "ee",
        'उ' => "u",
        'ऊ' => "oo",
        'ऋ' => "ri",
        'ए' => "e",
        'ऐ' => "ai",
        'ओ' => "o",
        'औ' => "au",
        _ => return None,
    })
}

fn matra_sound(c: char) -> Option<&'static str> {
    Some(match c {
        'ा' => "aa",
        'ि' => "i",
        'ी' => "ee",
        'ु' => "u",
        'ू' => "oo",
        'ृ' => "ri",
        'े' => "e",
        'ै' => "ai",
        'ो' => "o",
        'ौ' => "au",
        'ॉ' => "o",
        _ => return None,
    })
}

/// Walker state while consuming one word
#[derive(Debug, Clone, Copy)]
enum State {
    /// No consonant pending
    Idle,
    /// A consonant sound was seen; inherent-vowel decision is pending
    AfterConsonant(&'static str),
    /// Consonant + halant seen; the next consonant joins as a conjunct
    AfterHalant(&'static str),
}

/// Devanagari → Roman transliterator.
///
/// The fix table maps systematically over/under-lengthened romanizations of
/// known names to their conventional spellings ("bhuumikaa" → "Bhumika").
/// It is a small curated list, not a general rule.
#[derive(Debug, Clone)]
pub struct Transliterator {
    spelling_fixes: HashMap<String, String>,
}

impl Default for Transliterator {
    fn default() -> Self {
        let fixes = [
            ("bhuumikaa", "Bhumika"),
            ("bhoomika", "Bhumika"),
            ("bhoomikaa", "Bhumika"),
            ("gaaurii", "Gauri"),
            ("gauri", "Gauri"),
            ("gaauree", "Gauri"),
            ("raakaesha", "Rakesh"),
            ("raakesh", "Rakesh"),
            ("rakaesha", "Rakesh"),
            ("tekaama", "Tekam"),
            ("tekam", "Tekam"),
            ("shaarmaa", "Sharma"),
            ("sharmaa", "Sharma"),
            ("sharma", "Sharma"),
            ("kumaara", "Kumar"),
            ("kumar", "Kumar"),
            ("singha", "Singh"),
            ("singh", "Singh"),
            ("naandinii", "Nandini"),
            ("nandini", "Nandini"),
            ("jaaina", "Jain"),
            ("jain", "Jain"),
            ("priyaa", "Priya"),
            ("priya", "Priya"),
            ("anushkaa", "Anushka"),
            ("anushka", "Anushka"),
            ("raajaesha", "Rajesh"),
            ("rajesh", "Rajesh"),
            ("sunaila", "Sunil"),
            ("sunil", "Sunil"),
            ("deepaka", "Deepak"),
            ("deepak", "Deepak"),
            ("aashaa", "Asha"),
            ("asha", "Asha"),
        ];
        Self {
            spelling_fixes: fixes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Transliterator {
    /// Create a transliterator with a custom fix table (per-locale override)
    pub fn with_fixes(spelling_fixes: HashMap<String, String>) -> Self {
        Self { spelling_fixes }
    }

    /// Transliterate all Devanagari words in `text`, leaving Roman words
    /// untouched. Total function: returns an empty string for empty input.
    pub fn to_roman(&self, text: &str) -> String {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|word| {
                if crate::script::contains_devanagari(word) {
                    let romanized = self.transliterate_word(word);
                    let cleaned = collapse_vowel_runs(&romanized);
                    self.apply_fixes(&cleaned)
                } else {
                    word.to_string()
                }
            })
            .collect();
        words.join(" ")
    }

    /// Walk a single word through the state machine
    fn transliterate_word(&self, word: &str) -> String {
        let mut out = String::new();
        let mut state = State::Idle;

        for c in word.chars() {
            state = match (state, classify(c)) {
                // Pending consonant decisions
                (State::AfterConsonant(pending), CharClass::Matra(m)) => {
                    out.push_str(pending);
                    out.push_str(m);
                    State::Idle
                }
                (State::AfterConsonant(pending), CharClass::Halant) => State::AfterHalant(pending),
                (State::AfterConsonant(pending), CharClass::Consonant(next)) => {
                    // Mid-word consonant boundary: the inherent "a" applies
                    out.push_str(pending);
                    out.push('a');
                    State::AfterConsonant(next)
                }
                (State::AfterConsonant(pending), CharClass::Vowel(v)) => {
                    out.push_str(pending);
                    out.push('a');
                    out.push_str(v);
                    State::Idle
                }
                (State::AfterConsonant(pending), CharClass::Nasal) => {
                    out.push_str(pending);
                    out.push('n');
                    State::Idle
                }
                (State::AfterConsonant(pending), CharClass::Visarga) => {
                    out.push_str(pending);
                    out.push('h');
                    State::Idle
                }
                (State::AfterConsonant(pending), CharClass::OtherLetter(other)) => {
                    out.push_str(pending);
                    out.push('a');
                    out.push(other);
                    State::Idle
                }
                (State::AfterConsonant(pending), CharClass::Other) => {
                    out.push_str(pending);
                    State::Idle
                }

                // Conjunct: both consonant sounds, no vowel between
                (State::AfterHalant(pending), CharClass::Consonant(next)) => {
                    out.push_str(pending);
                    State::AfterConsonant(next)
                }
                // Stray halant sequences emit the bare consonant sound
                (State::AfterHalant(pending), CharClass::Matra(m)) => {
                    out.push_str(pending);
                    out.push_str(m);
                    State::Idle
                }
                (State::AfterHalant(pending), _) => {
                    out.push_str(pending);
                    State::Idle
                }

                // Nothing pending
                (State::Idle, CharClass::Consonant(sound)) => State::AfterConsonant(sound),
                (State::Idle, CharClass::Vowel(v)) => {
                    out.push_str(v);
                    State::Idle
                }
                // Stray marks without a carrier still voice their sound
                (State::Idle, CharClass::Matra(m)) => {
                    out.push_str(m);
                    State::Idle
                }
                (State::Idle, CharClass::Nasal) => {
                    out.push('n');
                    State::Idle
                }
                (State::Idle, CharClass::Visarga) => {
                    out.push('h');
                    State::Idle
                }
                (State::Idle, CharClass::Halant) => State::Idle,
                (State::Idle, CharClass::OtherLetter(other)) => {
                    out.push(other);
                    State::Idle
                }
                (State::Idle, CharClass::Other) => State::Idle,
            };
        }

        // Word-final consonant gets no inherent vowel
        match state {
            State::AfterConsonant(pending) | State::AfterHalant(pending) => out.push_str(pending),
            State::Idle => {}
        }

        out
    }

    fn apply_fixes(&self, word: &str) -> String {
        match self.spelling_fixes.get(&word.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => word.to_string(),
        }
    }
}

/// Collapse runs of 3+ identical vowel letters down to at most 2.
///
/// The matra walk can stack vowels ("gaaurii" style artifacts); two is the
/// longest run conventional romanizations use (aa, ee, oo).
fn collapse_vowel_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run_char = '\0';
    let mut run_len = 0usize;

    for c in text.chars() {
        if c == run_char && matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') {
            run_len += 1;
            if run_len > 2 {
                continue;
            }
        } else {
            run_char = c;
            run_len = 1;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roman(text: &str) -> String {
        Transliterator::default().to_roman(text)
    }

    #[test]
    fn simple_consonant_vowel_word() {
        // र(ि) त(े) श → ri te sh, final consonant without inherent vowel
        assert_eq!(roman("रितेश"), "ritesh");
    }

    #[test]
    fn inherent_vowel_in_word_middle_only() {
        // व र म(ा): middle consonants get "a", the matra overrides the last
        assert_eq!(roman("वरमा"), "waramaa");
    }

    #[test]
    fn conjunct_suppresses_inherent_vowel() {
        // विक्रम: क + halant + र is a conjunct → "kr"
        assert_eq!(roman("विक्रम"), "wikram");
    }

    #[test]
    fn nasal_and_visarga_marks() {
        assert_eq!(roman("सिंह"), "sinh");
        assert_eq!(roman("दुःख"), "duhkh");
    }

    #[test]
    fn trailing_halant_emits_bare_consonant() {
        assert_eq!(roman("विक्रान्त्"), "wikraant");
    }

    #[test]
    fn fix_table_applies_after_walk() {
        // भूमिका → bhoomikaa → fix table ("bhoomikaa") → Bhumika
        assert_eq!(roman("भूमिका"), "Bhumika");
        assert_eq!(roman("शर्मा"), "Sharma");
    }

    #[test]
    fn roman_words_pass_through() {
        assert_eq!(roman("Ritesh वरमा"), "Ritesh waramaa");
        assert_eq!(roman(""), "");
    }

    #[test]
    fn vowel_runs_collapse_to_two() {
        assert_eq!(collapse_vowel_runs("gaaauri"), "gaauri");
        assert_eq!(collapse_vowel_runs("raaam"), "raam");
        assert_eq!(collapse_vowel_runs("deepak"), "deepak");
    }
}
