use crate::domain::model::{MeterPattern, OutputFormat, TieBreak};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Splits a normalized word (lowercase, surrounding punctuation removed)
/// into ordered syllables. Empty input yields an empty vector.
pub trait SyllableSegmenter: Send + Sync {
    fn syllables(&self, word: &str, language: &str) -> Vec<String>;
}

impl<T: SyllableSegmenter + ?Sized> SyllableSegmenter for &T {
    fn syllables(&self, word: &str, language: &str) -> Vec<String> {
        (**self).syllables(word, language)
    }
}

impl<T: SyllableSegmenter + ?Sized> SyllableSegmenter for Box<T> {
    fn syllables(&self, word: &str, language: &str) -> Vec<String> {
        (**self).syllables(word, language)
    }
}

/// Batch lookup against an out-of-process syllabifier.
#[async_trait]
pub trait SyllableSource: Send + Sync {
    async fn lookup(&self, words: &[String], language: &str)
        -> Result<HashMap<String, Vec<String>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyllabifierKind {
    Rules,
    Remote {
        endpoint: String,
        concurrent_requests: usize,
        timeout_seconds: u64,
    },
}

pub trait ConfigProvider: Send + Sync {
    fn language(&self) -> &str;
    fn combined_separator(&self) -> &str;
    fn tie_break(&self) -> TieBreak;
    fn meter_entries(&self) -> Vec<MeterPattern>;
    fn syllabifier(&self) -> SyllabifierKind;
    fn output_format(&self) -> OutputFormat;
}
