mod agent;
mod config;
mod errors;
mod routes;
mod service;

use axum::{Router, routing::get, routing::post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::GeminiAgentService;
use crate::config::Config;
use crate::routes::api_routes::{chat_handler, health_handler};
use crate::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_assistant=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let agent = GeminiAgentService::new(&config)?;
    let chat_service = ChatService::new(agent);
    info!(model = %config.model, owner = %config.owner_name, "Gemini agent ready");

    // ── Router ────────────────────────────────────────────────────────────────
    let mut app = Router::new()
        .route("/api/chat", post(chat_handler::<GeminiAgentService>))
        .route("/health", get(health_handler))
        .with_state(chat_service);

    if let Some(dist) = &config.frontend_dist {
        info!("Serving widget bundle from {}", dist.display());
        app = app.fallback_service(ServeDir::new(dist));
    }

    // The widget may be embedded on another origin than this server.
    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
