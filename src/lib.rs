pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod logging;
pub mod summarize;
pub mod validate;

use std::sync::Arc;
use config::Config;
use error::ConfigError;
use summarize::Summarizer;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let summarizer = Summarizer::new(&config)?;
        Ok(AppState {
            config: Arc::new(config),
            summarizer: Arc::new(summarizer),
        })
    }
}
