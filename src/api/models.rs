use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::loader::LoaderKind;
use crate::summarize::Summary;

/// Fields posted by the HTML form.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub credential: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub loader: LoaderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub summary: String,
    pub summarized_at: DateTime<Utc>,
    pub word_count: usize,
    pub document_count: usize,
}

impl From<Summary> for SummarizeResponse {
    fn from(summary: Summary) -> Self {
        SummarizeResponse {
            url: summary.url,
            loader: summary.loader,
            title: summary.title,
            summary: summary.text,
            summarized_at: Utc::now(),
            word_count: summary.word_count,
            document_count: summary.document_count,
        }
    }
}
