//! Tracescan Web Server
//!
//! Axum-based HTTP front door: accepts an image, runs one presence
//! analysis, and answers with the result as JSON.

pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracescan_core::PresenceAnalyzer;

use state::AppState;

/// Where and how to serve.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
}

/// Create the application router.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/analyze", post(routes::analyze::analyze_json))
        .route("/analyze/raw", post(routes::analyze::analyze_raw))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server.
pub async fn run_server(analyzer: PresenceAnalyzer, config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(analyzer);
    let app = create_router(state, config.body_limit);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
