//! Turning a URL into document text.
//!
//! Two strategies exist: a transcript loader for video-hosting URLs and a plain
//! page loader for everything else. [`LoaderKind::for_url`] decides which one
//! runs; [`Loaders`] owns the HTTP clients both of them use.

pub mod web;
pub mod youtube;

use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{ConfigError, Result};

pub use web::WebLoader;
pub use youtube::YoutubeLoader;

/// Substrings that mark a URL as belonging to the video host.
pub const VIDEO_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderKind {
    Video,
    Web,
}

impl LoaderKind {
    pub fn for_url(url: &Url) -> Self {
        let raw = url.as_str();
        if VIDEO_HOST_MARKERS.iter().any(|marker| raw.contains(marker)) {
            LoaderKind::Video
        } else {
            LoaderKind::Web
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn word_count(&self) -> usize {
        self.page_content.split_whitespace().count()
    }
}

#[derive(Clone)]
pub struct Loaders {
    web: WebLoader,
    video: YoutubeLoader,
}

impl Loaders {
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Loaders {
            web: WebLoader::new(config.verify_tls)?,
            video: YoutubeLoader::new(config.youtube_base_url.clone())?,
        })
    }

    pub async fn load(&self, kind: LoaderKind, url: &Url) -> Result<Vec<Document>> {
        match kind {
            LoaderKind::Video => self.video.load(url).await,
            LoaderKind::Web => self.web.load(url).await,
        }
    }
}
