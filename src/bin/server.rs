//! Server binary for the academic regulation QA service

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tanya_akademik::providers::{OllamaClient, OllamaEmbedder, OllamaLlm};
use tanya_akademik::retrieval::VectorIndex;
use tanya_akademik::server::{self, AppState};
use tanya_akademik::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tanya_akademik=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        std::env::var("TANYA_AKADEMIK_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Arc::new(
        AppConfig::load_or_default(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path))?,
    );

    tracing::info!(
        ollama = %config.llm.base_url,
        embed_model = %config.llm.embed_model,
        generate_model = %config.llm.generate_model,
        "Starting tanya-akademik server"
    );

    let ollama = Arc::new(OllamaClient::new(&config.llm)?);
    if !ollama.health_check().await.unwrap_or(false) {
        tracing::warn!(
            "Ollama is not reachable at {}; chat requests will fail until it is up",
            config.llm.base_url
        );
    }

    let embedder = Arc::new(OllamaEmbedder::from_client(
        ollama.clone(),
        config.llm.embed_dimensions,
    ));
    let llm = Arc::new(OllamaLlm::from_client(
        ollama,
        config.llm.generate_model.clone(),
    ));
    let store = Arc::new(
        VectorIndex::open(&config.store.index_path).context("Failed to open vector index")?,
    );

    let state = AppState::new(config, store, embedder, llm);
    server::run(state).await.context("Server error")?;

    Ok(())
}
