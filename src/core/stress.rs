//! Lexical stress for a single word.
//!
//! An orthographic accent wins outright; otherwise Portuguese default stress
//! applies: words ending in a vowel, `n` or `s` are paroxytone, the rest are
//! oxytone.

/// Characters stripped from both ends of a token before analysis.
pub const STRIP_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'',
];

pub const ACCENTED_VOWELS: &[char] = &['á', 'à', 'â', 'ã', 'é', 'ê', 'í', 'ó', 'ô', 'õ', 'ú'];

const PAROXYTONE_ENDINGS: &[char] = &['a', 'e', 'i', 'o', 'u', 'n', 's'];

pub fn normalize_word(token: &str) -> String {
    token.to_lowercase().trim_matches(STRIP_CHARS).to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StressAssigner;

impl StressAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Index of the stressed syllable, or `None` when there are no syllables.
    pub fn stressed_index(&self, token: &str, syllables: &[String]) -> Option<usize> {
        if syllables.is_empty() {
            return None;
        }

        if let Some(accented) = syllables
            .iter()
            .position(|syllable| syllable.chars().any(|c| ACCENTED_VOWELS.contains(&c)))
        {
            return Some(accented);
        }

        let last = syllables.len() - 1;
        let paroxytone = normalize_word(token)
            .chars()
            .last()
            .is_some_and(|c| PAROXYTONE_ENDINGS.contains(&c));

        if paroxytone {
            Some(last.saturating_sub(1))
        } else {
            Some(last)
        }
    }

    /// One character per syllable, `1` at the stressed position.
    pub fn scansion(&self, token: &str, syllables: &[String]) -> String {
        match self.stressed_index(token, syllables) {
            Some(stressed) => (0..syllables.len())
                .map(|i| if i == stressed { '1' } else { '0' })
                .collect(),
            None => String::new(),
        }
    }
}
