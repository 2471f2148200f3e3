//! The request flow: validate, load, prompt, generate.

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::llm::{InferenceClient, ModelSettings};
use crate::loader::{Document, LoaderKind, Loaders};
use crate::validate::validate;

pub const SUMMARY_TEMPLATE: &str = "
Provide a summary of the following content in 300 words:
Content:{text}
";

const TEXT_PLACEHOLDER: &str = "{text}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        PromptTemplate {
            template: template.into(),
        }
    }

    pub fn format(&self, text: &str) -> String {
        self.template.replace(TEXT_PLACEHOLDER, text)
    }

    /// Places every document into one prompt.
    pub fn stuff(&self, documents: &[Document]) -> String {
        let joined = documents
            .iter()
            .map(|doc| doc.page_content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.format(&joined)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        PromptTemplate::new(SUMMARY_TEMPLATE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub url: String,
    pub loader: LoaderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    pub document_count: usize,
    pub word_count: usize,
}

#[derive(Clone)]
pub struct Summarizer {
    loaders: Loaders,
    llm: InferenceClient,
    prompt: PromptTemplate,
}

impl Summarizer {
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Summarizer {
            loaders: Loaders::new(config)?,
            llm: InferenceClient::new(&config.inference_url, ModelSettings::default())?,
            prompt: PromptTemplate::default(),
        })
    }

    /// Runs the whole flow for one request. Input problems are reported
    /// before anything touches the network.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn summarize(&self, credential: &str, url: &str) -> Result<Summary> {
        let request = validate(credential, url)?;
        let kind = LoaderKind::for_url(&request.url);
        info!(?kind, "loading content");

        let documents = self.loaders.load(kind, &request.url).await?;
        let word_count: usize = documents.iter().map(Document::word_count).sum();

        let prompt = self.prompt.stuff(&documents);
        let text = self.llm.generate(&request.credential, &prompt).await?;
        info!(words = word_count, summary_chars = text.len(), "summary ready");

        Ok(Summary {
            url: request.url.to_string(),
            loader: kind,
            title: documents.iter().find_map(|doc| doc.metadata.title.clone()),
            text,
            document_count: documents.len(),
            word_count,
        })
    }
}
