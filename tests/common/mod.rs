#![allow(dead_code)]

use url::Url;
use url_summarizer::config::Config;
use wiremock::MockServer;

pub const MODEL_PATH: &str = "/models/mistralai/Mistral-7B-Instruct-v0.3";

/// Points both the inference endpoint and the video host at the mock server.
pub fn config_for(server: &MockServer, default_credential: Option<&str>) -> Config {
    let base = Url::parse(&server.uri()).unwrap();
    Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        default_credential: default_credential.map(str::to_string),
        inference_url: base.join("models").unwrap(),
        youtube_base_url: base,
        verify_tls: false,
    }
}

pub fn article_html() -> &'static str {
    r#"<html>
  <head><title>Ownership in Rust</title></head>
  <body>
    <nav>Home</nav>
    <script>window.analytics = true;</script>
    <article>
      <h1>Ownership in Rust</h1>
      <p>Every value has a single owner.</p>
      <p>When the owner goes out of scope the value is dropped.</p>
    </article>
  </body>
</html>"#
}

pub fn watch_page(video_id: &str, caption_path: Option<&str>) -> String {
    let captions = match caption_path {
        Some(path) => format!(
            r#","captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{path}","languageCode":"en","kind":"asr"}}]}}}}"#
        ),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html><html><body><script>var ytInitialPlayerResponse = {{"playabilityStatus":{{"status":"OK"}},"videoDetails":{{"videoId":"{video_id}","title":"Borrowing Explained","author":"Rust Talks","shortDescription":"A talk.","viewCount":"4242","lengthSeconds":"300"}}{captions}}};var meta = 1;</script></body></html>"#
    )
}

pub fn transcript_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0" dur="2">welcome to the talk</text><text start="2" dur="3">today we borrow things</text></transcript>"#
}
