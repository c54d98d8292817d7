use crate::domain::model::AnalysisRequest;
use crate::utils::error::Result;
use std::io::Read;
use std::path::Path;

/// Where the CLI takes its request from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Lines(Vec<String>),
    File(String),
    Stdin,
}

impl InputSource {
    pub fn from_args(lines: &[String], input: Option<&str>) -> Self {
        match input {
            Some(path) => InputSource::File(path.to_string()),
            None if !lines.is_empty() => InputSource::Lines(lines.to_vec()),
            None => InputSource::Stdin,
        }
    }

    pub fn read_request(&self) -> Result<AnalysisRequest> {
        match self {
            InputSource::Lines(lines) => Ok(AnalysisRequest::new(lines.clone())),
            InputSource::File(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(parse_request(Path::new(path), &content))
            }
            InputSource::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(AnalysisRequest::from_text(&content))
            }
        }
    }
}

fn parse_request(path: &Path, content: &str) -> AnalysisRequest {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        AnalysisRequest::from_json_lenient(content)
    } else {
        AnalysisRequest::from_text(content)
    }
}
