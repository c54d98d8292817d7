use crate::core::stress::{normalize_word, StressAssigner};
use crate::domain::model::{Line, LineDetails, Word, WordDetail};
use crate::domain::ports::SyllableSegmenter;

pub const SYLLABLE_SEPARATOR: &str = "-";

pub struct LineScanner<S: SyllableSegmenter> {
    segmenter: S,
    language: String,
    assigner: StressAssigner,
}

impl<S: SyllableSegmenter> LineScanner<S> {
    pub fn new(segmenter: S, language: impl Into<String>) -> Self {
        Self {
            segmenter,
            language: language.into(),
            assigner: StressAssigner::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn scan_word(&self, token: &str) -> Word {
        let normalized = normalize_word(token);
        let syllables = if normalized.is_empty() {
            Vec::new()
        } else {
            self.segmenter.syllables(&normalized, &self.language)
        };
        let stressed_index = self.assigner.stressed_index(token, &syllables);
        let scansion = self.assigner.scansion(token, &syllables);

        Word {
            text: token.to_string(),
            syllables,
            stressed_index,
            scansion,
        }
    }

    /// Words are split on single spaces only, so doubled spaces produce
    /// empty words that contribute nothing.
    pub fn scan_line(&self, text: &str) -> Line {
        Line {
            text: text.to_string(),
            words: text.split(' ').map(|token| self.scan_word(token)).collect(),
        }
    }
}

pub fn line_details(line: &Line) -> LineDetails {
    let details: Vec<WordDetail> = line
        .words
        .iter()
        .map(|word| WordDetail {
            word: word.text.clone(),
            syllable_breakdown: word.syllables.join(SYLLABLE_SEPARATOR),
            scansion: word.scansion.clone(),
            syllable_count: word.syllable_count(),
        })
        .collect();
    let total_syllables = details.iter().map(|d| d.syllable_count).sum();

    LineDetails {
        details,
        total_syllables,
    }
}
