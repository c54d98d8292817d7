use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Syllabifier request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid meter pattern '{pattern}': {reason}")]
    CatalogError { pattern: String, reason: String },

    #[error("Syllabification of '{word}' failed: {message}")]
    SegmenterError { word: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScanError::HttpError(_) | ScanError::SegmenterError { .. } => ErrorCategory::Network,
            ScanError::IoError(_) => ErrorCategory::Io,
            ScanError::CsvError(_)
            | ScanError::SerializationError(_)
            | ScanError::ProcessingError { .. } => ErrorCategory::Data,
            ScanError::ConfigError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::ConfigValidationError { .. }
            | ScanError::CatalogError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the remote syllabifier may simply be restarting
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScanError::HttpError(_) | ScanError::SegmenterError { .. } => {
                "Check that the syllabification service is running, or set [syllabifier] type = \"rules\""
            }
            ScanError::IoError(_) => "Check that the input and config paths exist and are readable",
            ScanError::CsvError(_)
            | ScanError::SerializationError(_)
            | ScanError::ProcessingError { .. } => {
                "Try another output format, e.g. --format json"
            }
            ScanError::CatalogError { .. } => {
                "Meter patterns may only contain '0' and '1' and need at least one '1'"
            }
            ScanError::ConfigError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::ConfigValidationError { .. } => {
                "Review the configuration file against the documented sections"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not syllabify the poem: {}", self),
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Data => format!("Could not render the analysis: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
