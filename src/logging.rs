//! Logging init: structured output to stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,url_summarizer=debug";

/// Initialize the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
