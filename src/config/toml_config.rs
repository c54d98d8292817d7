use crate::adapters::rules::{RuleSegmenter, SUPPORTED_LANGUAGES};
use crate::core::analyzer::DEFAULT_LANGUAGE;
use crate::core::meter::MeterCatalog;
use crate::domain::model::{MeterPattern, OutputFormat, TieBreak};
use crate::domain::ports::{ConfigProvider, SyllabifierKind};
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONCURRENT_REQUESTS: usize = 8;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub syllabifier: SyllabifierConfig,
    #[serde(default)]
    pub meter: MeterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub language: Option<String>,
    pub combined_separator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyllabifierConfig {
    pub r#type: Option<String>,
    pub endpoint: Option<String>,
    pub concurrent_requests: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeterConfig {
    pub tie_break: Option<String>,
    pub seed: Option<u64>,
    pub catalog: Option<Vec<MeterPattern>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScanError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScanError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn syllabifier_type(&self) -> &str {
        self.syllabifier.r#type.as_deref().unwrap_or("rules")
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("analysis.language", self.language())?;

        match self.syllabifier_type() {
            "rules" => {
                if !RuleSegmenter::supports(self.language()) {
                    return Err(ScanError::InvalidConfigValueError {
                        field: "analysis.language".to_string(),
                        value: self.language().to_string(),
                        reason: format!(
                            "The rules syllabifier supports: {}",
                            SUPPORTED_LANGUAGES.join(", ")
                        ),
                    });
                }
            }
            "remote" => {
                let endpoint =
                    validation::validate_required_field("syllabifier.endpoint", &self.syllabifier.endpoint)?;
                validation::validate_url("syllabifier.endpoint", endpoint)?;
            }
            other => {
                validation::validate_one_of("syllabifier.type", other, &["rules", "remote"])?;
            }
        }

        if let Some(concurrent) = self.syllabifier.concurrent_requests {
            validation::validate_positive_number("syllabifier.concurrent_requests", concurrent, 1)?;
        }
        if let Some(timeout) = self.syllabifier.timeout_seconds {
            validation::validate_range("syllabifier.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(tie_break) = &self.meter.tie_break {
            validation::validate_one_of("meter.tie_break", tie_break, &TieBreak::NAMES)?;
        }
        if let Some(format) = &self.output.format {
            validation::validate_one_of("output.format", format, &OutputFormat::NAMES)?;
        }

        MeterCatalog::new(self.meter_entries())?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn language(&self) -> &str {
        self.analysis.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    fn combined_separator(&self) -> &str {
        self.analysis.combined_separator.as_deref().unwrap_or("")
    }

    fn tie_break(&self) -> TieBreak {
        self.meter
            .tie_break
            .as_deref()
            .and_then(|name| TieBreak::from_name(name, self.meter.seed))
            .unwrap_or_default()
    }

    /// The configured catalog replaces the built-in one entirely.
    fn meter_entries(&self) -> Vec<MeterPattern> {
        match &self.meter.catalog {
            Some(entries) => entries.clone(),
            None => MeterCatalog::default().iter().cloned().collect(),
        }
    }

    fn syllabifier(&self) -> SyllabifierKind {
        match (self.syllabifier_type(), &self.syllabifier.endpoint) {
            ("remote", Some(endpoint)) => SyllabifierKind::Remote {
                endpoint: endpoint.clone(),
                concurrent_requests: self
                    .syllabifier
                    .concurrent_requests
                    .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
                timeout_seconds: self.syllabifier.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            },
            _ => SyllabifierKind::Rules,
        }
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .format
            .as_deref()
            .and_then(OutputFormat::from_name)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
