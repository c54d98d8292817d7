use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use verse_scan::domain::ports::SyllableSource;
use verse_scan::{
    AnalysisRequest, MeterVerdict, RemoteSegmenter, ScanEngine, ScanError, TomlConfig,
};

async fn mock_word<'a>(
    server: &'a MockServer,
    word: &str,
    syllables: &[&str],
) -> httpmock::Mock<'a> {
    let body = serde_json::json!({ "syllables": syllables });
    let word = word.to_string();
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/syllables")
                .query_param("word", word)
                .query_param("lang", "pt_PT");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}

#[tokio::test]
async fn test_lookup_fetches_each_word() -> Result<()> {
    let server = MockServer::start_async().await;
    let casa = mock_word(&server, "casa", &["ca", "sa"]).await;
    let bela = mock_word(&server, "bela", &["be", "la"]).await;

    let remote = RemoteSegmenter::new(server.url("/syllables"), 2, Duration::from_secs(5))?;
    let words = vec!["bela".to_string(), "casa".to_string()];
    let syllables = remote.lookup(&words, "pt_PT").await?;

    assert_eq!(syllables["casa"], vec!["ca", "sa"]);
    assert_eq!(syllables["bela"], vec!["be", "la"]);
    casa.assert_async().await;
    bela.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_lookup_with_more_words_than_concurrent_requests() -> Result<()> {
    let server = MockServer::start_async().await;
    let words = [
        ("bela", vec!["be", "la"]),
        ("casa", vec!["ca", "sa"]),
        ("lua", vec!["lu", "a"]),
        ("mar", vec!["mar"]),
        ("noite", vec!["noi", "te"]),
    ];
    let mut mocks = Vec::new();
    for (word, syllables) in &words {
        mocks.push(mock_word(&server, word, syllables).await);
    }

    let remote = RemoteSegmenter::new(server.url("/syllables"), 2, Duration::from_secs(5))?;
    let requested: Vec<String> = words.iter().map(|(word, _)| word.to_string()).collect();
    let syllables = remote.lookup(&requested, "pt_PT").await?;

    assert_eq!(syllables.len(), words.len());
    for (word, expected) in &words {
        assert_eq!(&syllables[*word], expected);
    }
    for mock in &mocks {
        mock.assert_hits_async(1).await;
    }
    Ok(())
}

#[tokio::test]
async fn test_engine_with_remote_syllabifier() -> Result<()> {
    let server = MockServer::start_async().await;
    let casa = mock_word(&server, "casa", &["ca", "sa"]).await;
    let bela = mock_word(&server, "bela", &["be", "la"]).await;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[syllabifier]
type = "remote"
endpoint = "{}"
concurrent_requests = 4
"#,
        server.url("/syllables")
    ))?;
    let engine = ScanEngine::new(config)?;

    let request = AnalysisRequest::new(vec![
        "Casa bela,".to_string(),
        "bela casa".to_string(),
        "casa casa!".to_string(),
    ]);
    let response = engine.run(&request).await?;

    // repeated words are looked up once
    casa.assert_hits_async(1).await;
    bela.assert_hits_async(1).await;
    assert_eq!(response.scansion, vec!["1010", "1010", "1010"]);
    assert_eq!(
        response.meter,
        MeterVerdict::Known(vec!["trochaic bimeter".to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn test_service_failure_is_segmenter_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/syllables");
            then.status(503);
        })
        .await;

    let remote = RemoteSegmenter::new(server.url("/syllables"), 1, Duration::from_secs(5))?;
    let err = remote
        .lookup(&["casa".to_string()], "pt_PT")
        .await
        .unwrap_err();

    match err {
        ScanError::SegmenterError { word, message } => {
            assert_eq!(word, "casa");
            assert!(message.contains("503"));
        }
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_segmenter_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/syllables");
            then.status(200).json_body(serde_json::json!({ "parts": ["ca", "sa"] }));
        })
        .await;

    let remote = RemoteSegmenter::new(server.url("/syllables"), 1, Duration::from_secs(5))?;
    let result = remote.lookup(&["casa".to_string()], "pt_PT").await;
    assert!(matches!(result, Err(ScanError::SegmenterError { .. })));
    Ok(())
}
