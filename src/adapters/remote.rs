use crate::domain::ports::SyllableSource;
use crate::utils::error::{Result, ScanError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SyllablesBody {
    syllables: Vec<String>,
}

/// Client for an HTTP syllabification service answering
/// `GET {endpoint}?word=..&lang=..` with `{"syllables": [..]}`.
pub struct RemoteSegmenter {
    client: Client,
    endpoint: String,
    concurrent_requests: usize,
}

impl RemoteSegmenter {
    pub fn new(endpoint: impl Into<String>, concurrent_requests: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            concurrent_requests: concurrent_requests.max(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<String>> {
        tracing::debug!("Requesting syllables for '{}' from {}", word, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("word", word), ("lang", language)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::SegmenterError {
                word: word.to_string(),
                message: format!("service answered with status {}", status),
            });
        }

        let body: SyllablesBody = response.json().await.map_err(|e| ScanError::SegmenterError {
            word: word.to_string(),
            message: format!("malformed response body: {}", e),
        })?;
        Ok(body.syllables)
    }
}

#[async_trait]
impl SyllableSource for RemoteSegmenter {
    async fn lookup(
        &self,
        words: &[String],
        language: &str,
    ) -> Result<HashMap<String, Vec<String>>> {
        tracing::info!(
            "Syllabifying {} words via {} ({} concurrent requests)",
            words.len(),
            self.endpoint,
            self.concurrent_requests
        );

        stream::iter(words.iter().cloned())
            .map(|word: String| async move {
                let syllables = self.fetch(&word, language).await?;
                Ok::<_, ScanError>((word, syllables))
            })
            .buffer_unordered(self.concurrent_requests)
            .try_collect()
            .await
    }
}
