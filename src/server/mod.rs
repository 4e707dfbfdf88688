//! HTTP server assembly

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::Result;

pub use state::AppState;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/chat", post(routes::chat::chat))
        .route("/api/v1/documents", get(routes::documents::list))
        .route("/api/v1/documents/ingest", post(routes::documents::ingest))
        .layer(TraceLayer::new_for_http());

    if state.config.server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Bind and serve until shutdown
pub async fn run(state: AppState) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    let router = create_router(state);
    axum::serve(listener, router).await?;
    Ok(())
}
