pub mod analyzer;
pub mod combiner;
pub mod engine;
pub mod meter;
pub mod report;
pub mod scanner;
pub mod stress;

pub use crate::domain::model::{AnalysisRequest, AnalysisResponse, MeterVerdict};
pub use crate::domain::ports::{ConfigProvider, SyllableSegmenter, SyllableSource};
pub use crate::utils::error::Result;
