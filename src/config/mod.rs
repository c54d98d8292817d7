pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "verse-scan")]
#[command(about = "Scans verse for syllabic stress and infers its meter")]
pub struct CliConfig {
    /// Lines of verse; read from --input or stdin when omitted
    pub lines: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Request file: `.json` holds {"lines": [...]}, anything else is one line per line
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format: json, pretty, csv or tsv
    #[arg(short, long)]
    pub format: Option<String>,

    /// Tie-break among equally voted meters: lexical, first or random
    #[arg(long)]
    pub tie_break: Option<String>,

    /// Seed for the random tie-break
    #[arg(long)]
    pub seed: Option<u64>,

    /// Language code handed to the syllabifier
    #[arg(long)]
    pub language: Option<String>,

    /// Print the meter catalog and exit
    #[arg(long)]
    pub list_meters: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// File settings (or defaults) with command-line overrides applied.
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(format) = &self.format {
            settings.output.format = Some(format.clone());
        }
        if let Some(tie_break) = &self.tie_break {
            settings.meter.tie_break = Some(tie_break.clone());
        }
        if let Some(seed) = self.seed {
            settings.meter.seed = Some(seed);
        }
        if let Some(language) = &self.language {
            settings.analysis.language = Some(language.clone());
        }

        Ok(settings)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::{OutputFormat, TieBreak};
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_args() {
        let cli = CliConfig::parse_from([
            "verse-scan",
            "--format",
            "csv",
            "--tie-break",
            "first",
            "casa bela",
            "bela casa",
        ]);
        assert_eq!(cli.lines, vec!["casa bela", "bela casa"]);
        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.output_format(), OutputFormat::Csv);
        assert_eq!(settings.tie_break(), TieBreak::First);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[meter]\ntie_break = \"random\"\nseed = 1\n[output]\nformat = \"tsv\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["verse-scan", "--config", path.as_str(), "--seed", "9"]);
        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.tie_break(), TieBreak::Random { seed: Some(9) });
        assert_eq!(settings.output_format(), OutputFormat::Tsv);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let cli = CliConfig::parse_from(["verse-scan", "--config", "/nonexistent/verse-scan.toml"]);
        assert!(matches!(
            cli.load_settings(),
            Err(crate::utils::error::ScanError::IoError(_))
        ));
    }
}
