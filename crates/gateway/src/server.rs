use std::{sync::Arc, time::Instant};

use {
    axum::{Json, Router, extract::State, response::IntoResponse, routing::get},
    tracing::info,
};

use {banter_providers::FallbackChain, banter_sessions::SessionStore};

/// Shared state for the health handlers.
#[derive(Clone)]
pub struct AppState {
    pub started: Instant,
    pub sessions: Arc<SessionStore>,
    pub chain: Arc<FallbackChain>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>, chain: Arc<FallbackChain>) -> Self {
        Self {
            started: Instant::now(),
            sessions,
            chain,
        }
    }
}

/// Build the health-check router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr, "health server listening");
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "bot is running",
        "uptime_secs": state.started.elapsed().as_secs(),
    }))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started.elapsed().as_secs(),
        "conversations": state.sessions.len(),
        "providers": state.chain.len(),
        "last_successful_provider": state.chain.last_successful(),
    }))
}
