mod common;

use common::{article_html, config_for, transcript_xml, watch_page, MODEL_PATH};
use url_summarizer::error::SummarizeError;
use url_summarizer::loader::LoaderKind;
use url_summarizer::loader::web::USER_AGENT;
use url_summarizer::summarize::Summarizer;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_string_contains, header, method, path, query_param},
};

fn summarizer_for(server: &MockServer) -> Summarizer {
    Summarizer::new(&config_for(server, None)).unwrap()
}

#[tokio::test]
async fn test_missing_input_makes_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let page = format!("{}/article", mock_server.uri());

    for (credential, url) in [("", page.as_str()), ("tok123", "   "), (" ", "")] {
        let err = summarizer.summarize(credential, url).await.unwrap_err();
        assert_eq!(err, SummarizeError::MissingInput);
    }
}

#[tokio::test]
async fn test_malformed_url_makes_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let err = summarizer.summarize("tok123", "not a url").await.unwrap_err();

    assert_eq!(err, SummarizeError::MalformedUrl("not a url".to_string()));
}

#[tokio::test]
async fn test_article_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer tok123"))
        .and(body_string_contains("Provide a summary of the following content in 300 words"))
        .and(body_string_contains("Every value has a single owner."))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "generated_text": "  Rust values have one owner.  " }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let url = format!("{}/article", mock_server.uri());
    let summary = summarizer.summarize("tok123", &url).await.unwrap();

    assert_eq!(summary.text, "Rust values have one owner.");
    assert_eq!(summary.loader, LoaderKind::Web);
    assert_eq!(summary.url, url);
    assert_eq!(summary.title.as_deref(), Some("Ownership in Rust"));
    assert_eq!(summary.document_count, 1);
    assert!(summary.word_count > 10);

    let requests = mock_server.received_requests().await.unwrap();
    let page_fetch = requests
        .iter()
        .find(|r| r.method.as_str() == "GET")
        .unwrap();
    assert_eq!(
        page_fetch.headers.get("user-agent").unwrap().to_str().unwrap(),
        USER_AGENT
    );

    let inference = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&inference.body).unwrap();
    let prompt = body["inputs"].as_str().unwrap();
    assert!(prompt.contains("Content:Home"));
    assert!(!prompt.contains("analytics"));
    assert_eq!(body["parameters"]["max_new_tokens"], 150);
    let temperature = body["parameters"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_fetch_404_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let url = format!("{}/missing", mock_server.uri());

    match summarizer.summarize("tok123", &url).await {
        Err(SummarizeError::FetchFailure(msg)) => assert!(msg.contains("404"), "{msg}"),
        other => panic!("Expected fetch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_page_without_text_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><script>render()</script></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let url = format!("{}/blank", mock_server.uri());

    match summarizer.summarize("tok123", &url).await {
        Err(SummarizeError::FetchFailure(msg)) => assert!(msg.contains("no extractable content")),
        other => panic!("Expected fetch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;
    let summarizer = summarizer_for(&mock_server);

    // Port 9 (discard) on loopback is not listening in test environments.
    let err = summarizer
        .summarize("tok123", "http://127.0.0.1:9/article")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "fetch_failure");
}

#[tokio::test]
async fn test_inference_error_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Model is currently loading" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let url = format!("{}/article", mock_server.uri());

    match summarizer.summarize("tok123", &url).await {
        Err(SummarizeError::InferenceFailure(msg)) => {
            assert!(msg.contains("503"), "{msg}");
            assert!(msg.contains("Model is currently loading"), "{msg}");
        }
        other => panic!("Expected inference failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_inference_garbage_is_an_inference_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let url = format!("{}/article", mock_server.uri());
    let err = summarizer.summarize("tok123", &url).await.unwrap_err();

    assert_eq!(
        err,
        SummarizeError::InferenceFailure("Model returned no text".to_string())
    );
}

#[tokio::test]
async fn test_video_url_uses_transcript() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", "abc123XYZ_-"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(watch_page("abc123XYZ_-", Some("/api/timedtext?v=abc123XYZ_-&lang=en"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(transcript_xml()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains("welcome to the talk today we borrow things"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generated_text": "A talk about borrowing." })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let summary = summarizer
        .summarize("tok123", "https://www.youtube.com/watch?v=abc123XYZ_-")
        .await
        .unwrap();

    assert_eq!(summary.loader, LoaderKind::Video);
    assert_eq!(summary.text, "A talk about borrowing.");
    assert_eq!(summary.title.as_deref(), Some("Borrowing Explained"));
}

#[tokio::test]
async fn test_video_without_captions_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watch_page("abc123", None)))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let err = summarizer
        .summarize("tok123", "https://youtu.be/abc123")
        .await
        .unwrap_err();

    match err {
        SummarizeError::FetchFailure(msg) => assert!(msg.contains("no transcript"), "{msg}"),
        other => panic!("Expected fetch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_video_host_url_without_id_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let err = summarizer
        .summarize("tok123", "https://www.youtube.com/@rustlang")
        .await
        .unwrap_err();

    assert!(matches!(err, SummarizeError::FetchFailure(_)));
}

#[tokio::test]
async fn test_unplayable_video_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"LOGIN_REQUIRED","reason":"Sign in"}};</script></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let err = summarizer
        .summarize("tok123", "https://www.youtube.com/watch?v=locked01")
        .await
        .unwrap_err();

    match err {
        SummarizeError::FetchFailure(msg) => assert!(msg.contains("not playable: Sign in"), "{msg}"),
        other => panic!("Expected fetch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_blank_transcript_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(watch_page("quiet01", Some("/api/timedtext?v=quiet01&lang=en"))),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<transcript><text> </text></transcript>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summarizer = summarizer_for(&mock_server);
    let err = summarizer
        .summarize("tok123", "https://youtu.be/quiet01")
        .await
        .unwrap_err();

    match err {
        SummarizeError::FetchFailure(msg) => assert!(msg.contains("is empty"), "{msg}"),
        other => panic!("Expected fetch failure, got {other:?}"),
    }
}
