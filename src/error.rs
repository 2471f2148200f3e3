use axum::http::StatusCode;

/// Everything that can stop a summary from being produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizeError {
    #[error("Please provide the information to get started")]
    MissingInput,

    #[error("Please enter a valid URL. It can be a YT video URL or website URL: {0}")]
    MalformedUrl(String),

    #[error("Failed to fetch content: {0}")]
    FetchFailure(String),

    #[error("Inference error: {0}")]
    InferenceFailure(String),
}

impl SummarizeError {
    pub fn kind(&self) -> &'static str {
        match self {
            SummarizeError::MissingInput => "missing_input",
            SummarizeError::MalformedUrl(_) => "malformed_url",
            SummarizeError::FetchFailure(_) => "fetch_failure",
            SummarizeError::InferenceFailure(_) => "inference_failure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::MissingInput | SummarizeError::MalformedUrl(_) => StatusCode::BAD_REQUEST,
            SummarizeError::FetchFailure(_) | SummarizeError::InferenceFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// True for the two kinds that are detected before any network traffic.
    pub fn is_input_error(&self) -> bool {
        matches!(self, SummarizeError::MissingInput | SummarizeError::MalformedUrl(_))
    }
}

/// Startup-only configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid URL in {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("Invalid boolean in {name}: {value}")]
    InvalidBool { name: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<reqwest::Error> for ConfigError {
    fn from(err: reqwest::Error) -> Self {
        ConfigError::HttpClient(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
