use crate::domain::model::{AnalysisResponse, OutputFormat};
use crate::utils::error::{Result, ScanError};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WordRow<'a> {
    line: usize,
    word: &'a str,
    syllable_breakdown: &'a str,
    scansion: &'a str,
    syllable_count: usize,
}

pub fn render(response: &AnalysisResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => render_table(response, b','),
        OutputFormat::Tsv => render_table(response, b'\t'),
    }
}

/// One row per word; headers come from `WordRow`.
fn render_table(response: &AnalysisResponse, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for (line, details) in response.word_details.iter().enumerate() {
        for detail in &details.details {
            writer.serialize(WordRow {
                line,
                word: &detail.word,
                syllable_breakdown: &detail.syllable_breakdown,
                scansion: &detail.scansion,
                syllable_count: detail.syllable_count,
            })?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| ScanError::ProcessingError {
        message: format!("Failed to flush table output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| ScanError::ProcessingError {
        message: format!("Table output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LineDetails, MeterVerdict, WordDetail};

    fn response() -> AnalysisResponse {
        AnalysisResponse {
            original_lines: vec!["casa, café".to_string()],
            scansion: vec!["1001".to_string()],
            word_details: vec![LineDetails {
                details: vec![
                    WordDetail {
                        word: "casa,".to_string(),
                        syllable_breakdown: "ca-sa".to_string(),
                        scansion: "10".to_string(),
                        syllable_count: 2,
                    },
                    WordDetail {
                        word: "café".to_string(),
                        syllable_breakdown: "ca-fé".to_string(),
                        scansion: "01".to_string(),
                        syllable_count: 2,
                    },
                ],
                total_syllables: 4,
            }],
            combined_lines: vec!["casa, café".to_string()],
            meter: MeterVerdict::Unknown,
        }
    }

    #[test]
    fn test_render_json_fields() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&response(), OutputFormat::Json).unwrap()).unwrap();
        for field in ["original_lines", "scansion", "word_details", "combined_lines", "meter"] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["word_details"][0]["total_syllables"], 4);
    }

    #[test]
    fn test_render_pretty_round_trips() {
        let text = render(&response(), OutputFormat::Pretty).unwrap();
        assert!(text.contains('\n'));
        let parsed: AnalysisResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, response());
    }

    #[test]
    fn test_render_csv_quotes_punctuation() {
        let text = render(&response(), OutputFormat::Csv).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "line,word,syllable_breakdown,scansion,syllable_count");
        assert_eq!(rows[1], "0,\"casa,\",ca-sa,10,2");
        assert_eq!(rows[2], "0,café,ca-fé,01,2");
    }

    #[test]
    fn test_render_tsv() {
        let text = render(&response(), OutputFormat::Tsv).unwrap();
        assert!(text.starts_with("line\tword\tsyllable_breakdown\tscansion\tsyllable_count\n"));
        assert!(text.contains("0\tcasa,\tca-sa\t10\t2"));
    }
}
