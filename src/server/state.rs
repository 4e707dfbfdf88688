//! Shared application state

use std::sync::Arc;

use crate::config::AppConfig;
use crate::ingestion::pipeline::RegulationPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Vector index holding the ingested chunks
    pub store: Arc<dyn VectorStoreProvider>,
    /// Embedding provider
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Answer generation provider
    pub llm: Arc<dyn LlmProvider>,
    /// Document-to-chunk pipeline
    pub pipeline: Arc<RegulationPipeline>,
}

impl AppState {
    /// Assemble the state from its components
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn VectorStoreProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let pipeline = Arc::new(RegulationPipeline::new(config.ingestion.clone()));
        Self {
            config,
            store,
            embedder,
            llm,
            pipeline,
        }
    }
}
