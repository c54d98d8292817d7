//! In-process Portuguese syllabifier.
//!
//! Works on orthography alone: vowel runs are split into nuclei (falling
//! diphthongs stay together, everything else is hiatus) and the consonants
//! between two nuclei are shared out so that the next syllable gets the
//! longest legal onset.

use crate::domain::ports::SyllableSegmenter;
use std::sync::atomic::{AtomicBool, Ordering};

pub const SUPPORTED_LANGUAGES: [&str; 5] = ["pt", "pt_PT", "pt_BR", "pt-PT", "pt-BR"];

const VOWELS: &[char] = &[
    'a', 'e', 'i', 'o', 'u', 'y', 'á', 'à', 'â', 'ã', 'é', 'ê', 'í', 'ó', 'ô', 'õ', 'ú', 'ü',
];

/// First consonant of an inseparable onset cluster (second is `l` or `r`).
const OBSTRUENTS: &[char] = &['b', 'c', 'd', 'f', 'g', 'k', 'p', 't', 'v'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Vowel,
    Consonant,
}

/// A letter, or a digraph that behaves as one consonant.
#[derive(Debug, Clone)]
struct Unit {
    text: String,
    kind: Kind,
}

#[derive(Debug, Default)]
pub struct RuleSegmenter {
    /// Set once the unsupported-language warning has been logged.
    warned: AtomicBool,
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supports(language: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&language)
    }

    fn warn_unsupported(&self, language: &str) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!("Rule syllabifier has no rules for '{}', using Portuguese", language);
        }
    }
}

impl SyllableSegmenter for RuleSegmenter {
    fn syllables(&self, word: &str, language: &str) -> Vec<String> {
        if !Self::supports(language) {
            self.warn_unsupported(language);
        }
        syllabify(word)
    }
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Unaccented high vowel that can close a diphthong.
fn is_glide(c: char) -> bool {
    c == 'i' || c == 'u'
}

pub fn syllabify(word: &str) -> Vec<String> {
    if !word.chars().any(char::is_alphabetic) {
        return Vec::new();
    }

    let units = units(word);
    let nuclei = nuclei(&units);
    if nuclei.is_empty() {
        return vec![word.to_string()];
    }

    // Each syllable starts at a unit index; the first one always at 0.
    let mut starts = vec![0];
    for pair in nuclei.windows(2) {
        let (prev_end, next_start) = (pair[0].1, pair[1].0);
        let between = &units[prev_end..next_start];
        starts.push(next_start - onset_length(between));
    }

    let mut syllables: Vec<String> = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(units.len());
        syllables.push(units[start..end].iter().map(|u| u.text.as_str()).collect());
    }
    syllables
}

fn units(word: &str) -> Vec<Unit> {
    let chars: Vec<char> = word.chars().collect();
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        let after = chars.get(i + 2).copied();

        let digraph = match (c, next) {
            ('c' | 'l' | 'n', Some('h')) => true,
            // the u of "que", "gui", "água" belongs to the consonant
            ('q' | 'g', Some('u' | 'ü')) => after.is_some_and(is_vowel),
            _ => false,
        };

        if digraph {
            units.push(Unit {
                text: chars[i..i + 2].iter().collect(),
                kind: Kind::Consonant,
            });
            i += 2;
        } else {
            units.push(Unit {
                text: c.to_string(),
                kind: if is_vowel(c) { Kind::Vowel } else { Kind::Consonant },
            });
            i += 1;
        }
    }
    units
}

/// Half-open unit ranges of each syllable nucleus, in order.
fn nuclei(units: &[Unit]) -> Vec<(usize, usize)> {
    let mut nuclei: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;

    while i < units.len() {
        if units[i].kind != Kind::Vowel {
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        if i < units.len() && units[i].kind == Kind::Vowel && forms_diphthong(&units[start], &units[i]) {
            i += 1;
        }
        nuclei.push((start, i));
    }
    nuclei
}

fn forms_diphthong(first: &Unit, second: &Unit) -> bool {
    let (Some(a), Some(b)) = (first.text.chars().next(), second.text.chars().next()) else {
        return false;
    };
    match (a, b) {
        ('ã' | 'õ', 'e' | 'o') => true,
        (a, b) if a == b => false,
        (_, b) => is_glide(b),
    }
}

/// How many of the consonant units between two nuclei open the next syllable.
fn onset_length(between: &[Unit]) -> usize {
    match between.len() {
        0 => 0,
        1 => 1,
        n => {
            let (first, second) = (&between[n - 2], &between[n - 1]);
            if is_onset_cluster(&first.text, &second.text) {
                2
            } else {
                1
            }
        }
    }
}

fn is_onset_cluster(first: &str, second: &str) -> bool {
    let mut first_chars = first.chars();
    let (Some(a), None) = (first_chars.next(), first_chars.next()) else {
        return false;
    };
    OBSTRUENTS.contains(&a) && (second == "l" || second == "r")
}
