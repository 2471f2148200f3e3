use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use once_cell::sync::Lazy;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{ConfigError, Result, SummarizeError};
use super::{Document, DocumentMetadata};

/// Browser-like agent; some sites refuse the default reqwest one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

const SKIPPED_TAGS: [&str; 5] = ["script", "style", "noscript", "template", "svg"];

const BLOCK_TAGS: [&str; 22] = [
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td",
    "section", "article", "header", "footer", "blockquote", "pre", "main", "nav",
];

/// Fetches an arbitrary page and keeps the readable text of its body.
#[derive(Clone)]
pub struct WebLoader {
    client: Client,
}

impl WebLoader {
    pub fn new(verify_tls: bool) -> std::result::Result<Self, ConfigError> {
        if !verify_tls {
            warn!("TLS certificate verification is disabled for page fetches");
        }

        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(WebLoader { client })
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn load(&self, url: &Url) -> Result<Vec<Document>> {
        let html = self.fetch_html(url).await?;

        let text = extract_text(&html);
        if text.is_empty() {
            return Err(SummarizeError::FetchFailure(format!(
                "no extractable content at {url}"
            )));
        }
        debug!(chars = text.len(), "extracted page text");

        Ok(vec![Document {
            page_content: text,
            metadata: DocumentMetadata {
                source: url.to_string(),
                title: extract_title(&html),
                ..DocumentMetadata::default()
            },
        }])
    }

    async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SummarizeError::FetchFailure(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| SummarizeError::FetchFailure(e.to_string()))
    }
}

pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Collects the visible text under `<body>`, breaking lines around block elements.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    let mut raw = String::with_capacity(html.len() / 2);
    for node in body.descendants() {
        let follows_block = node
            .prev_sibling()
            .and_then(|sibling| sibling.value().as_element())
            .is_some_and(|el| BLOCK_TAGS.contains(&el.name()));
        if follows_block {
            raw.push('\n');
        }

        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
            });
            if !hidden {
                raw.push_str(text);
            }
        } else if let Some(el) = node.value().as_element() {
            if BLOCK_TAGS.contains(&el.name()) {
                raw.push('\n');
            }
        }
    }

    format_text(&raw)
}

pub fn format_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(first);
        for word in words {
            result.push(' ');
            result.push_str(word);
        }
    }

    result
}
