use serde::{Deserialize, Serialize};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ConfigError, Result, SummarizeError};
use crate::validate::Credential;

pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
pub const MAX_NEW_TOKENS: u32 = 150;
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            model: DEFAULT_MODEL.to_string(),
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

/// The endpoint answers with either a list of generations or a single one.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Many(Vec<Generated>),
    One(Generated),
}

#[derive(Deserialize)]
struct EndpointError {
    error: String,
}

/// Client for a hosted text-generation endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: Url,
    settings: ModelSettings,
}

impl InferenceClient {
    pub fn new(base_url: &Url, settings: ModelSettings) -> std::result::Result<Self, ConfigError> {
        let mut endpoint = base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| ConfigError::InvalidUrl {
                name: "inference endpoint",
                reason: format!("{base_url} cannot be a base"),
            })?
            .pop_if_empty()
            .extend(settings.model.split('/'));

        Ok(InferenceClient {
            client: Client::new(),
            endpoint,
            settings,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[instrument(skip_all, fields(model = %self.settings.model, prompt_chars = prompt.len()))]
    pub async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: self.settings.max_new_tokens,
                temperature: self.settings.temperature,
                return_full_text: false,
            },
        };

        let res = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizeError::InferenceFailure(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| SummarizeError::InferenceFailure(e.to_string()))?;
        debug!(%status, body_chars = text.len(), "inference endpoint replied");

        if !status.is_success() {
            let message = serde_json::from_str::<EndpointError>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(SummarizeError::InferenceFailure(format!("{status}: {message}")));
        }

        let generated = match serde_json::from_str::<GenerateResponse>(&text) {
            Ok(GenerateResponse::One(generated)) => Some(generated),
            Ok(GenerateResponse::Many(list)) => list.into_iter().next(),
            Err(e) => {
                return Err(SummarizeError::InferenceFailure(format!(
                    "Invalid response format from model: {e}"
                )));
            }
        };

        generated
            .map(|g| g.generated_text.trim().to_string())
            .ok_or_else(|| SummarizeError::InferenceFailure("Model returned no text".to_string()))
    }
}
