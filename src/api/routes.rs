use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    response::{Html, IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, warn};

use crate::AppState;
use crate::api::models::{SummarizeForm, SummarizeRequest, SummarizeResponse};
use crate::api::page::{self, Outcome, PageView};
use crate::api::response;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/health", get(health_handler))
        .route("/api/summarize", post(summarize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// A credential typed into the request wins over the configured one.
pub fn resolve_credential(provided: Option<&str>, configured: Option<&str>) -> String {
    provided
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or(configured)
        .unwrap_or_default()
        .to_string()
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&PageView {
        credential_configured: state.config.default_credential.is_some(),
        url: "",
        outcome: None,
    }))
}

async fn form_handler(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Html<String> {
    let credential = resolve_credential(
        form.credential.as_deref(),
        state.config.default_credential.as_deref(),
    );

    let outcome = match state.summarizer.summarize(&credential, &form.url).await {
        Ok(summary) => Outcome::Success(summary),
        Err(err) => {
            warn!(kind = err.kind(), "summarize failed: {}", err);
            Outcome::Failure(err)
        }
    };

    Html(page::render(&PageView {
        credential_configured: state.config.default_credential.is_some(),
        url: &form.url,
        outcome: Some(outcome),
    }))
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Response {
    info!("Processing request for URL: {}", req.url);
    let start_time = std::time::Instant::now();

    let credential = resolve_credential(
        req.credential.as_deref(),
        state.config.default_credential.as_deref(),
    );
    let result = state.summarizer.summarize(&credential, &req.url).await;
    info!("Request processing took: {:?}", start_time.elapsed());

    match result {
        Ok(summary) => response::success(SummarizeResponse::from(summary)).into_response(),
        Err(err) => {
            warn!(kind = err.kind(), "summarize failed: {}", err);
            response::error::<SummarizeResponse>(&err).into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}
