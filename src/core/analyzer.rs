use crate::core::combiner::{merge_lines, LineCombiner};
use crate::core::meter::{MeterCatalog, MeterMatcher};
use crate::core::scanner::{line_details, LineScanner};
use crate::domain::model::{AnalysisRequest, AnalysisResponse, Line, TieBreak};
use crate::domain::ports::{ConfigProvider, SyllableSegmenter};
use crate::utils::error::Result;
use std::sync::Arc;

pub const DEFAULT_LANGUAGE: &str = "pt_PT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub language: String,
    pub tie_break: TieBreak,
    pub combined_separator: String,
}

impl AnalyzerOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            language: config.language().to_string(),
            tie_break: config.tie_break(),
            combined_separator: config.combined_separator().to_string(),
        }
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            tie_break: TieBreak::default(),
            combined_separator: String::new(),
        }
    }
}

/// Runs scansion, line combination and meter inference for one request.
pub struct MeterAnalyzer<S: SyllableSegmenter> {
    scanner: LineScanner<S>,
    combiner: LineCombiner,
    matcher: MeterMatcher,
    combined_separator: String,
}

impl<S: SyllableSegmenter> MeterAnalyzer<S> {
    pub fn new(segmenter: S, catalog: impl Into<Arc<MeterCatalog>>, options: AnalyzerOptions) -> Self {
        Self {
            scanner: LineScanner::new(segmenter, options.language),
            combiner: LineCombiner::new(),
            matcher: MeterMatcher::new(catalog, options.tie_break),
            combined_separator: options.combined_separator,
        }
    }

    /// Builds and validates the catalog from `config`. Callers running many
    /// requests should build the catalog once and use [`MeterAnalyzer::new`].
    pub fn from_config<C: ConfigProvider>(segmenter: S, config: &C) -> Result<Self> {
        let catalog = MeterCatalog::new(config.meter_entries())?;
        Ok(Self::new(segmenter, catalog, AnalyzerOptions::from_config(config)))
    }

    pub fn matcher(&self) -> &MeterMatcher {
        &self.matcher
    }

    pub fn scan(&self, lines: &[String]) -> Vec<Line> {
        lines.iter().map(|text| self.scanner.scan_line(text)).collect()
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let lines = self.scan(&request.lines);

        let scansion: Vec<String> = lines.iter().map(Line::scansion).collect();
        for (index, line_scansion) in scansion.iter().enumerate() {
            tracing::debug!("Line {}: {} ({} syllables)", index, line_scansion, line_scansion.len());
        }

        let word_details = lines.iter().map(line_details).collect();

        let combined = self.combiner.combine(&scansion);
        let combined_lines = merge_lines(&request.lines, &combined, &self.combined_separator);
        for (group, text) in combined.iter().zip(&combined_lines) {
            tracing::debug!(
                "Combined lines {:?} ({} syllables): {}",
                group.indices,
                group.syllable_count,
                text
            );
        }

        let meter = self.matcher.infer_meter(&scansion);
        tracing::info!(
            "Analyzed {} lines into {} combined lines, meter: {}",
            request.lines.len(),
            combined_lines.len(),
            meter
        );

        AnalysisResponse {
            original_lines: request.lines.clone(),
            scansion,
            word_details,
            combined_lines,
            meter,
        }
    }
}
