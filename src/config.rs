use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use url::Url;
use crate::error::ConfigError;

pub const ENV_API_KEY: &str = "HUGGINGFACE_API_KEY";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_INFERENCE_URL: &str = "HF_INFERENCE_URL";
pub const ENV_YOUTUBE_BASE_URL: &str = "YOUTUBE_BASE_URL";
pub const ENV_VERIFY_TLS: &str = "SUMMARIZER_VERIFY_TLS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Credential picked up from the environment, used when the form leaves it blank.
    pub default_credential: Option<String>,
    /// Base URL of the inference API; the model id is appended as a path segment.
    pub inference_url: Url,
    pub youtube_base_url: Url,
    /// Certificate verification for generic page fetches. Off unless asked for.
    pub verify_tls: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source. Absent variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_credential = lookup(ENV_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup(ENV_PORT).unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidPort(format!("{port}: {e}")))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| ConfigError::InvalidHost(format!("{host}: {e}")))?;

        let inference_url = parse_url(
            ENV_INFERENCE_URL,
            lookup(ENV_INFERENCE_URL).as_deref().unwrap_or(DEFAULT_INFERENCE_URL),
        )?;
        let youtube_base_url = parse_url(
            ENV_YOUTUBE_BASE_URL,
            lookup(ENV_YOUTUBE_BASE_URL).as_deref().unwrap_or(DEFAULT_YOUTUBE_BASE_URL),
        )?;

        let verify_tls = match lookup(ENV_VERIFY_TLS) {
            Some(value) => parse_bool(ENV_VERIFY_TLS, &value)?,
            None => false,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            default_credential,
            inference_url,
            youtube_base_url,
            verify_tls,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("default_credential", &self.default_credential.as_ref().map(|_| "***"))
            .field("inference_url", &self.inference_url.as_str())
            .field("youtube_base_url", &self.youtube_base_url.as_str())
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: format!("{raw}: {e}"),
    })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: raw.to_string(),
        }),
    }
}
