pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::InputSource, CliConfig};

pub use crate::adapters::{PrefetchedSegmenter, RemoteSegmenter, RuleSegmenter};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{analyzer::MeterAnalyzer, engine::ScanEngine, meter::MeterCatalog};
pub use crate::domain::model::{AnalysisRequest, AnalysisResponse, MeterVerdict, OutputFormat, TieBreak};
pub use crate::utils::error::{Result, ScanError};
