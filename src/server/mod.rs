mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::trips::Storage;

pub fn build_router(storage: Box<dyn Storage>) -> Router {
    let state = Arc::new(AppState::new(storage));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/system", get(handlers::detect_system))
        .route("/api/systems", get(handlers::system_list))
        .route(
            "/api/recent_trips",
            get(handlers::recent_trips).post(handlers::save_trip),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, storage: Box<dyn Storage>) -> anyhow::Result<()> {
    let app = build_router(storage);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot bind to {}: {}", addr, e))?;

    eprintln!("  bestcar server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;
    Ok(())
}
