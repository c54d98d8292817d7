use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A single token of a line together with its derived syllables and stress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub syllables: Vec<String>,
    /// `None` only when the word has no syllables.
    pub stressed_index: Option<usize>,
    pub scansion: String,
}

impl Word {
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub words: Vec<Word>,
}

impl Line {
    pub fn scansion(&self) -> String {
        self.words.iter().map(|w| w.scansion.as_str()).collect()
    }

    pub fn syllable_count(&self) -> usize {
        self.words.iter().map(Word::syllable_count).sum()
    }
}

/// Ascending original line indices merged into one verse. Only lines without
/// syllables can fall between two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedLine {
    pub indices: Vec<usize>,
    pub syllable_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterPattern {
    pub pattern: String,
    pub name: String,
}

impl MeterPattern {
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Catalog names tied for the best score against one line's scansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterMatch {
    pub scansion_length: usize,
    pub score: f64,
    pub names: Vec<String>,
}

/// Inferred meter of a whole poem: a sorted name list or `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeterVerdict {
    Known(Vec<String>),
    Unknown,
}

impl MeterVerdict {
    pub fn is_unknown(&self) -> bool {
        matches!(self, MeterVerdict::Unknown)
    }

    pub fn names(&self) -> &[String] {
        match self {
            MeterVerdict::Known(names) => names,
            MeterVerdict::Unknown => &[],
        }
    }
}

impl std::fmt::Display for MeterVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeterVerdict::Known(names) => write!(f, "{}", names.join(", ")),
            MeterVerdict::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for MeterVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MeterVerdict::Known(names) => names.serialize(serializer),
            MeterVerdict::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for MeterVerdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Names(Vec<String>),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Names(names) => Ok(MeterVerdict::Known(names)),
            Repr::Text(text) if text == "unknown" => Ok(MeterVerdict::Unknown),
            Repr::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a list of meter names or \"unknown\", got \"{}\"",
                text
            ))),
        }
    }
}

/// How the poem-level vote picks among equally frequent meter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Smallest name in lexical order.
    #[default]
    Lexical,
    /// First name in discovery order.
    First,
    /// Uniform choice; a seed makes it repeatable.
    Random { seed: Option<u64> },
}

impl TieBreak {
    pub const NAMES: [&'static str; 3] = ["lexical", "first", "random"];

    pub fn from_name(name: &str, seed: Option<u64>) -> Option<Self> {
        match name {
            "lexical" => Some(TieBreak::Lexical),
            "first" => Some(TieBreak::First),
            "random" => Some(TieBreak::Random { seed }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["json", "pretty", "csv", "tsv"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "pretty" => Some(OutputFormat::Pretty),
            "csv" => Some(OutputFormat::Csv),
            "tsv" => Some(OutputFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub lines: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Parses `{"lines": [...]}`. Anything malformed, including a list with
    /// a non-string item, degrades to an empty request.
    pub fn from_json_lenient(text: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Malformed request body, treating as empty: {}", e);
                return Self::default();
            }
        };

        match value.get("lines") {
            Some(serde_json::Value::Array(items)) => {
                // response indices follow the input list, so it is taken whole or not at all
                match items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()
                {
                    Some(lines) => Self { lines },
                    None => {
                        tracing::warn!("Request 'lines' holds non-string entries, treating as empty");
                        Self::default()
                    }
                }
            }
            Some(other) => {
                tracing::warn!("Request 'lines' is not a list ({}), treating as empty", other);
                Self::default()
            }
            None => {
                tracing::warn!("Request has no 'lines' field, treating as empty");
                Self::default()
            }
        }
    }

    /// One request line per text line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetail {
    pub word: String,
    pub syllable_breakdown: String,
    pub scansion: String,
    pub syllable_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetails {
    pub details: Vec<WordDetail>,
    pub total_syllables: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub original_lines: Vec<String>,
    pub scansion: Vec<String>,
    pub word_details: Vec<LineDetails>,
    pub combined_lines: Vec<String>,
    pub meter: MeterVerdict,
}
