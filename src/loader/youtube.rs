use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ConfigError, Result, SummarizeError};
use super::web::USER_AGENT;
use super::{Document, DocumentMetadata};

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";
const PREFERRED_LANGUAGE: &str = "en";

static SEGMENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("text, p").expect("Failed to parse transcript segment selector")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    video_details: Option<VideoDetails>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: Option<String>,
    author: Option<String>,
    short_description: Option<String>,
    // YouTube sends both of these as decimal strings
    view_count: Option<String>,
    length_seconds: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// `"asr"` for auto-generated tracks.
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_preferred_language(&self) -> bool {
        self.language_code == PREFERRED_LANGUAGE
            || self.language_code.starts_with(&format!("{PREFERRED_LANGUAGE}-"))
    }

    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Loads a video's caption transcript plus its title, author and description.
#[derive(Clone)]
pub struct YoutubeLoader {
    client: Client,
    base_url: Url,
}

impl YoutubeLoader {
    pub fn new(base_url: Url) -> std::result::Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(YoutubeLoader { client, base_url })
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn load(&self, url: &Url) -> Result<Vec<Document>> {
        let id = video_id(url).ok_or_else(|| {
            SummarizeError::FetchFailure(format!("could not find a video id in {url}"))
        })?;
        debug!(video_id = %id, "loading video transcript");

        let page = self.get_text(self.watch_url(&id)?).await?;
        let player = parse_player_response(&page)?;

        if let Some(playability) = &player.playability_status {
            if playability.status != "OK" {
                let reason = playability.reason.as_deref().unwrap_or(&playability.status);
                return Err(SummarizeError::FetchFailure(format!(
                    "video {id} is not playable: {reason}"
                )));
            }
        }

        let tracks = player
            .captions
            .map(|c| c.player_captions_tracklist_renderer.caption_tracks)
            .unwrap_or_default();
        let track = choose_track(&tracks).ok_or_else(|| {
            SummarizeError::FetchFailure(format!("no transcript available for video {id}"))
        })?;
        debug!(language = %track.language_code, generated = track.is_generated(), "picked caption track");

        let track_url = self
            .base_url
            .join(&track.base_url)
            .map_err(|e| SummarizeError::FetchFailure(format!("bad caption track url: {e}")))?;
        let xml = self.get_text(track_url).await?;

        let transcript = parse_transcript(&xml);
        if transcript.is_empty() {
            return Err(SummarizeError::FetchFailure(format!(
                "transcript for video {id} is empty"
            )));
        }

        let details = player.video_details.unwrap_or_default();
        Ok(vec![Document {
            page_content: transcript,
            metadata: DocumentMetadata {
                source: id,
                title: details.title,
                author: details.author,
                description: details.short_description,
                view_count: details.view_count.and_then(|v| v.parse().ok()),
                length_seconds: details.length_seconds.and_then(|v| v.parse().ok()),
            },
        }])
    }

    fn watch_url(&self, id: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("watch")
            .map_err(|e| SummarizeError::FetchFailure(format!("bad video base url: {e}")))?;
        url.query_pairs_mut().append_pair("v", id);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url)
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

/// Pulls the video id out of the URL shapes the video host hands out.
pub fn video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if host == "youtu.be" || host.ends_with(".youtu.be") {
        segments.next().map(str::to_string)
    } else {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts" | "embed" | "live" | "v") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    candidate.filter(|id| {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

fn parse_player_response(page: &str) -> Result<PlayerResponse> {
    let missing = || SummarizeError::FetchFailure("video page has no player data".to_string());

    let start = page.find(PLAYER_RESPONSE_MARKER).ok_or_else(missing)?;
    let rest = &page[start + PLAYER_RESPONSE_MARKER.len()..];
    let brace = rest.find('{').ok_or_else(missing)?;

    // The object is followed by more script, so read exactly one JSON value.
    serde_json::Deserializer::from_str(&rest[brace..])
        .into_iter::<PlayerResponse>()
        .next()
        .ok_or_else(missing)?
        .map_err(|e| SummarizeError::FetchFailure(format!("unreadable player data: {e}")))
}

/// Manual tracks in the preferred language first, then generated ones, then anything.
fn choose_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.is_preferred_language() && !t.is_generated())
        .or_else(|| tracks.iter().find(|t| t.is_preferred_language()))
        .or_else(|| tracks.first())
}

fn parse_transcript(xml: &str) -> String {
    let fragment = Html::parse_fragment(xml);

    let segments: Vec<String> = fragment
        .select(&SEGMENT_SELECTOR)
        .map(|segment| {
            let raw: String = segment.text().collect();
            // Caption text arrives entity-encoded a second time
            let decoded = html_escape::decode_html_entities(&raw);
            decoded.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    segments.join(" ")
}
