use tokio::net::TcpListener;
use tracing::{info, warn};
use url_summarizer::{
    config::Config,
    api::routes::create_router,
    logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    if config.default_credential.is_none() {
        warn!("HUGGINGFACE_API_KEY is not set; the form will ask for a token");
    }

    // Create application state
    let app_state = AppState::new(config)?;

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
