use crate::core::stress::normalize_word;
use crate::domain::ports::{SyllableSegmenter, SyllableSource};
use crate::utils::error::Result;
use std::collections::{BTreeSet, HashMap};

/// Syllables looked up ahead of time, so analysis itself never waits on I/O.
#[derive(Debug, Clone, Default)]
pub struct PrefetchedSegmenter {
    words: HashMap<String, Vec<String>>,
}

impl PrefetchedSegmenter {
    pub fn new(words: HashMap<String, Vec<String>>) -> Self {
        Self { words }
    }

    /// Looks up every distinct normalized word of `lines` through `source`.
    pub async fn prefetch<S: SyllableSource + ?Sized>(
        source: &S,
        lines: &[String],
        language: &str,
    ) -> Result<Self> {
        let words = distinct_words(lines);
        tracing::debug!("Prefetching syllables for {} distinct words", words.len());
        let words = source.lookup(&words, language).await?;
        Ok(Self::new(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SyllableSegmenter for PrefetchedSegmenter {
    fn syllables(&self, word: &str, _language: &str) -> Vec<String> {
        match self.words.get(word) {
            Some(syllables) => syllables.clone(),
            None => {
                tracing::warn!("No prefetched syllables for '{}'", word);
                Vec::new()
            }
        }
    }
}

/// Normalized, non-empty words in sorted order, each once.
pub fn distinct_words(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split(' '))
        .map(normalize_word)
        .filter(|word| !word.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
