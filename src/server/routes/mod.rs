//! HTTP route handlers

pub mod chat;
pub mod documents;

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::HealthResponse;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let vector_store_ready = matches!(state.store.is_empty().await, Ok(false));
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        vector_store_ready,
    })
}
