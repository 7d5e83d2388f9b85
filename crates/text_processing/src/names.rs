//! Name resolution: cleaning, transliteration, spelling correction
//!
//! The resolver runs a fixed sequence: clean → script branch →
//! transliterate → spelling-correct → capitalize. Correction happens on
//! both script paths; the curated tables map phonetic variants produced by
//! ASR or the matra walk to conventional spellings. Fuzzy matching is
//! bounded (edit distance ≤ 2, word length ≥ 3) so a valid name is never
//! rewritten into a different valid name from far away.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::script::contains_devanagari;
use crate::translit::Transliterator;

static HONORIFICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:mr|mrs|ms|dr|prof|shri|sri|smt|kumari|श्री|श्रीमती)\.?\s+)+").unwrap()
});

/// Curated name tables injected into the resolver.
///
/// `BTreeMap` keeps fuzzy-match iteration deterministic: on a distance tie
/// the lexicographically first key wins, every run.
#[derive(Debug, Clone)]
pub struct NameLexicon {
    /// Phonetic first-name variant → canonical spelling
    pub first_names: BTreeMap<String, String>,
    /// Phonetic surname variant → canonical spelling
    pub surnames: BTreeMap<String, String>,
    /// Capitalization overrides for common surnames
    pub surname_overrides: BTreeMap<String, String>,
    /// Maximum Levenshtein distance for fuzzy correction
    pub max_distance: usize,
    /// Minimum word length to attempt fuzzy correction
    pub min_word_length: usize,
}

impl Default for NameLexicon {
    fn default() -> Self {
        let first_names = [
            // Male names
            ("naraj", "Neeraj"),
            ("neeraj", "Neeraj"),
            ("niraj", "Neeraj"),
            ("rakaesha", "Rakesh"),
            ("raakesh", "Rakesh"),
            ("rakesh", "Rakesh"),
            ("ritesh", "Ritesh"),
            ("reetesh", "Ritesh"),
            ("vikram", "Vikram"),
            ("vikraam", "Vikram"),
            ("wikram", "Vikram"),
            ("vikrant", "Vikrant"),
            ("vikraant", "Vikrant"),
            ("wikraant", "Vikrant"),
            ("nilesh", "Nilesh"),
            ("neelesh", "Nilesh"),
            ("rajesh", "Rajesh"),
            ("raajesh", "Rajesh"),
            ("rajesha", "Rajesh"),
            ("sunil", "Sunil"),
            ("sunail", "Sunil"),
            ("sunaila", "Sunil"),
            ("deepak", "Deepak"),
            ("dipak", "Deepak"),
            ("deepaka", "Deepak"),
            ("amit", "Amit"),
            ("amita", "Amit"),
            ("ameet", "Amit"),
            ("rahul", "Rahul"),
            ("raahul", "Rahul"),
            ("rahuul", "Rahul"),
            ("rohit", "Rohit"),
            ("roohit", "Rohit"),
            ("rohita", "Rohit"),
            ("vishal", "Vishal"),
            ("vishaal", "Vishal"),
            ("wishaal", "Vishal"),
            ("ajay", "Ajay"),
            ("ajaya", "Ajay"),
            ("ajai", "Ajay"),
            ("vijay", "Vijay"),
            ("vijaya", "Vijay"),
            ("vijai", "Vijay"),
            ("sanjay", "Sanjay"),
            ("sanjaya", "Sanjay"),
            ("sanjai", "Sanjay"),
            ("anil", "Anil"),
            ("anila", "Anil"),
            ("aneel", "Anil"),
            ("manoj", "Manoj"),
            ("manoja", "Manoj"),
            ("manooj", "Manoj"),
            ("ashok", "Ashok"),
            ("ashoka", "Ashok"),
            ("asok", "Ashok"),
            // Female names
            ("priya", "Priya"),
            ("priyaa", "Priya"),
            ("preeya", "Priya"),
            ("pooja", "Pooja"),
            ("puja", "Pooja"),
            ("poojaa", "Pooja"),
            ("nandini", "Nandini"),
            ("nandinii", "Nandini"),
            ("nandani", "Nandini"),
            ("anushka", "Anushka"),
            ("anushkaa", "Anushka"),
            ("anuska", "Anushka"),
            ("shreya", "Shreya"),
            ("shreyaa", "Shreya"),
            ("shrayaa", "Shreya"),
            ("divya", "Divya"),
            ("divyaa", "Divya"),
            ("diviya", "Divya"),
            ("neha", "Neha"),
            ("nehaa", "Neha"),
            ("naeha", "Neha"),
            ("asha", "Asha"),
            ("aashaa", "Asha"),
            ("aasha", "Asha"),
            ("kavita", "Kavita"),
            ("kavitaa", "Kavita"),
            ("kaavita", "Kavita"),
            ("sunita", "Sunita"),
            ("sunitaa", "Sunita"),
            ("suneeta", "Sunita"),
            ("bhumika", "Bhumika"),
            ("bhoomika", "Bhumika"),
            ("bhuumikaa", "Bhumika"),
            ("gauri", "Gauri"),
            ("gaaurii", "Gauri"),
            ("gowri", "Gauri"),
            ("rani", "Rani"),
            ("raanee", "Rani"),
            ("raani", "Rani"),
            ("nidhi", "Nidhi"),
            ("nidhee", "Nidhi"),
            ("akshat", "Akshat"),
            ("akshata", "Akshat"),
            ("nitesh", "Nitesh"),
            ("niteesh", "Nitesh"),
            ("akash", "Akash"),
            ("aakash", "Akash"),
            ("aakaasha", "Akash"),
        ];

        let surnames = [
            ("sharma", "Sharma"),
            ("shaarmaa", "Sharma"),
            ("sharman", "Sharma"),
            ("verma", "Verma"),
            ("varma", "Verma"),
            ("varmaa", "Verma"),
            ("kumar", "Kumar"),
            ("kumara", "Kumar"),
            ("kumaara", "Kumar"),
            ("singh", "Singh"),
            ("singha", "Singh"),
            ("simha", "Singh"),
            ("gupta", "Gupta"),
            ("guptaa", "Gupta"),
            ("gupt", "Gupta"),
            ("patel", "Patel"),
            ("patela", "Patel"),
            ("paatel", "Patel"),
            ("shah", "Shah"),
            ("shaha", "Shah"),
            ("shaah", "Shah"),
            ("jain", "Jain"),
            ("jaina", "Jain"),
            ("jaain", "Jain"),
            ("mehta", "Mehta"),
            ("mehtaa", "Mehta"),
            ("maehta", "Mehta"),
            ("agarwal", "Agarwal"),
            ("agarwaal", "Agarwal"),
            ("agrawaal", "Agarwal"),
            ("chowdhury", "Chowdhury"),
            ("chaudhuri", "Chowdhury"),
            ("choudhary", "Chowdhury"),
            ("reddy", "Reddy"),
            ("reddii", "Reddy"),
            ("readdy", "Reddy"),
            ("rao", "Rao"),
            ("raao", "Rao"),
            ("raav", "Rao"),
            ("kumawat", "Kumawat"),
            ("kamawat", "Kumawat"),
            ("kumaavat", "Kumawat"),
            ("tekam", "Tekam"),
            ("tekaama", "Tekam"),
            ("tekaam", "Tekam"),
            ("hada", "Hada"),
            ("haadaa", "Hada"),
            ("hadaa", "Hada"),
            ("dhara", "Dhara"),
            ("dharaa", "Dhara"),
            ("dhaara", "Dhara"),
            ("danot", "Danot"),
            ("danotya", "Danot"),
            ("danota", "Danot"),
        ];

        let surname_overrides = [
            ("kumar", "Kumar"),
            ("singh", "Singh"),
            ("sharma", "Sharma"),
            ("verma", "Verma"),
            ("gupta", "Gupta"),
            ("patel", "Patel"),
            ("shah", "Shah"),
            ("khan", "Khan"),
            ("reddy", "Reddy"),
            ("rao", "Rao"),
            ("jain", "Jain"),
            ("mehta", "Mehta"),
            ("agarwal", "Agarwal"),
        ];

        fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        Self {
            first_names: to_map(&first_names),
            surnames: to_map(&surnames),
            surname_overrides: to_map(&surname_overrides),
            max_distance: 2,
            min_word_length: 3,
        }
    }
}

/// Name resolver: clean → transliterate → correct → capitalize.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    lexicon: NameLexicon,
    transliterator: Transliterator,
}

impl NameResolver {
    pub fn new(lexicon: NameLexicon, transliterator: Transliterator) -> Self {
        Self {
            lexicon,
            transliterator,
        }
    }

    /// Resolve a candidate name. Total function: empty or all-noise input
    /// yields an empty string, never an error.
    ///
    /// `utterance_has_devanagari` signals the Hindi flow: the name came out
    /// of a Devanagari utterance and may need transliteration.
    pub fn resolve(&self, raw_name: &str, utterance_has_devanagari: bool) -> String {
        let cleaned = self.clean(raw_name);
        if cleaned.is_empty() {
            return String::new();
        }

        let romanized = if utterance_has_devanagari && contains_devanagari(&cleaned) {
            self.transliterator.to_roman(&cleaned)
        } else {
            cleaned
        };

        // Exact-table correction applies on both script paths. Fuzzy
        // matching only fires on the Hindi flow, where ASR and the matra
        // walk introduce the spelling noise the tables exist for; a name
        // heard in a pure-Latin utterance is never rewritten into a
        // different valid name.
        let corrected = self.correct(&romanized, utterance_has_devanagari);
        self.capitalize(&corrected)
    }

    /// Strip honorifics, digits, and punctuation; keep letters and spaces.
    pub fn clean(&self, name: &str) -> String {
        let trimmed = name.trim();
        let without_titles = HONORIFICS.replace(trimmed, "");

        // The virama and some matras are not `Alphabetic`, but stripping
        // them would destroy conjuncts before transliteration.
        let letters_only: String = without_titles
            .chars()
            .map(|c| {
                if c.is_alphabetic() || ('\u{0900}'..='\u{097F}').contains(&c) {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        letters_only.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Word-by-word spelling correction against the curated tables.
    pub fn correct(&self, name: &str, allow_fuzzy: bool) -> String {
        name.split_whitespace()
            .map(|word| self.correct_word(word, allow_fuzzy))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn correct_word(&self, word: &str, allow_fuzzy: bool) -> String {
        let lower = word.to_lowercase();

        if let Some(canonical) = self.lexicon.first_names.get(&lower) {
            return canonical.clone();
        }
        if let Some(canonical) = self.lexicon.surnames.get(&lower) {
            return canonical.clone();
        }

        if allow_fuzzy {
            if let Some(canonical) = self.fuzzy_match(&lower) {
                return canonical;
            }
        }

        word.to_string()
    }

    /// Best fuzzy match across both tables; first-name entries win ties.
    fn fuzzy_match(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.lexicon.min_word_length {
            return None;
        }

        let mut best: Option<(usize, &String)> = None;
        let candidates = self
            .lexicon
            .first_names
            .iter()
            .chain(self.lexicon.surnames.iter());

        for (variant, canonical) in candidates {
            // Length gap alone can rule out a candidate
            let len_gap = word
                .chars()
                .count()
                .abs_diff(variant.chars().count());
            if len_gap > self.lexicon.max_distance {
                continue;
            }

            let distance = levenshtein(word, variant);
            if distance <= self.lexicon.max_distance {
                match best {
                    Some((best_dist, _)) if distance >= best_dist => {}
                    _ => best = Some((distance, canonical)),
                }
            }
        }

        best.map(|(_, canonical)| canonical.clone())
    }

    /// Title-case each word; the override table forces common surname forms.
    fn capitalize(&self, name: &str) -> String {
        name.split_whitespace()
            .map(|word| {
                let lower = word.to_lowercase();
                if let Some(forced) = self.lexicon.surname_overrides.get(&lower) {
                    forced.clone()
                } else {
                    title_case(&lower)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Levenshtein distance: insertions, deletions, substitutions at cost 1.
///
/// Two-row rolling implementation; inputs are already lowercased.
pub fn levenshtein(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        NameResolver::default()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("waramaa", "varmaa"), 2);
    }

    #[test]
    fn clean_strips_titles_digits_punctuation() {
        let r = resolver();
        assert_eq!(r.clean("Mr. Rakesh Sharma"), "Rakesh Sharma");
        assert_eq!(r.clean("Dr Priya  Jain!"), "Priya Jain");
        assert_eq!(r.clean("श्री नीरज कुमावत"), "नीरज कुमावत");
        assert_eq!(r.clean("  rakesh 98765  "), "rakesh");
        assert_eq!(r.clean("12345"), "");
        assert_eq!(r.clean(""), "");
    }

    #[test]
    fn exact_correction_from_tables() {
        let r = resolver();
        assert_eq!(r.resolve("naraj kumawat", false), "Neeraj Kumawat");
        assert_eq!(r.resolve("sunaila varma", false), "Sunil Verma");
    }

    #[test]
    fn fuzzy_correction_bounded_by_distance() {
        let r = resolver();
        // "kumaawat" is distance 1 from "kumaavat": corrected
        assert_eq!(r.resolve("kumaawat", true), "Kumawat");
        // distance 2 from "choudhary": corrected
        assert_eq!(r.resolve("choudhry", true), "Chowdhury");
        // distance 3 from anything in the tables: left as-is, title-cased
        assert_eq!(r.resolve("chodhrey", true), "Chodhrey");
    }

    #[test]
    fn fuzzy_only_fires_on_hindi_flow() {
        let r = resolver();
        // "john" is within distance 2 of "jain" but came from a pure-Latin
        // utterance, so it stays untouched
        assert_eq!(r.resolve("john doe", false), "John Doe");
    }

    #[test]
    fn short_words_never_fuzzy_match() {
        let r = resolver();
        // "ra" is within distance 2 of "rao" but below the length floor
        assert_eq!(r.resolve("ra", true), "Ra");
    }

    #[test]
    fn devanagari_name_transliterates_and_corrects() {
        let r = resolver();
        assert_eq!(r.resolve("रितेश वरमा", true), "Ritesh Verma");
        assert_eq!(r.resolve("विक्रम सिंह", true), "Vikram Singh");
    }

    #[test]
    fn pure_latin_skips_transliteration() {
        let r = resolver();
        assert_eq!(r.resolve("rani verma", false), "Rani Verma");
        assert_eq!(r.resolve("JOHN DOE", false), "John Doe");
    }

    #[test]
    fn surname_override_capitalization() {
        let r = resolver();
        assert_eq!(r.resolve("amit khan", false), "Amit Khan");
    }

    #[test]
    fn idempotent_on_own_output() {
        let r = resolver();
        let once = r.resolve("रितेश वरमा", true);
        let twice = r.resolve(&once, false);
        assert_eq!(once, twice);

        let once = r.resolve("naraj kumawat", false);
        assert_eq!(r.resolve(&once, false), once);
    }

    #[test]
    fn empty_and_noise_degrade_to_empty() {
        let r = resolver();
        assert_eq!(r.resolve("", false), "");
        assert_eq!(r.resolve("   ", true), "");
        assert_eq!(r.resolve("!!! 123", false), "");
    }
}
