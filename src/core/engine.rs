use crate::adapters::{PrefetchedSegmenter, RemoteSegmenter, RuleSegmenter};
use crate::core::analyzer::{AnalyzerOptions, MeterAnalyzer};
use crate::core::meter::MeterCatalog;
use crate::core::report;
use crate::domain::model::{AnalysisRequest, AnalysisResponse};
use crate::domain::ports::{ConfigProvider, SyllabifierKind, SyllableSegmenter};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Picks the syllabifier the configuration asks for and runs requests
/// against a catalog validated once at construction.
pub struct ScanEngine<C: ConfigProvider> {
    config: C,
    catalog: Arc<MeterCatalog>,
}

impl<C: ConfigProvider> ScanEngine<C> {
    pub fn new(config: C) -> Result<Self> {
        let catalog = MeterCatalog::new(config.meter_entries())?;
        tracing::debug!("Loaded meter catalog with {} patterns", catalog.len());
        Ok(Self {
            config,
            catalog: Arc::new(catalog),
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn catalog(&self) -> &MeterCatalog {
        &self.catalog
    }

    pub fn analyzer<S: SyllableSegmenter>(&self, segmenter: S) -> MeterAnalyzer<S> {
        MeterAnalyzer::new(
            segmenter,
            Arc::clone(&self.catalog),
            AnalyzerOptions::from_config(&self.config),
        )
    }

    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let started = Instant::now();
        tracing::info!("Scanning {} lines", request.lines.len());

        let response = match self.config.syllabifier() {
            SyllabifierKind::Rules => self.analyzer(RuleSegmenter::new()).analyze(request),
            SyllabifierKind::Remote {
                endpoint,
                concurrent_requests,
                timeout_seconds,
            } => {
                let remote = RemoteSegmenter::new(
                    endpoint,
                    concurrent_requests,
                    Duration::from_secs(timeout_seconds),
                )?;
                let segmenter =
                    PrefetchedSegmenter::prefetch(&remote, &request.lines, self.config.language())
                        .await?;
                self.analyzer(segmenter).analyze(request)
            }
        };

        tracing::debug!("Scan finished in {:?}", started.elapsed());
        Ok(response)
    }

    pub async fn run_and_render(&self, request: &AnalysisRequest) -> Result<String> {
        let response = self.run(request).await?;
        report::render(&response, self.config.output_format())
    }
}
