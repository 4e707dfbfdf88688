//! Vector store provider trait for storing and searching embeddings

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::Chunk;

/// Search result from the vector store
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    /// The matched chunk
    pub chunk: Chunk,
    /// Similarity score (0.0 to 1.0, higher is more similar)
    pub similarity: f32,
}

/// Trait for vector storage and similarity search.
///
/// Upserts are keyed by `Chunk::identity_key`, so re-ingesting an unchanged
/// document replaces entries instead of duplicating them.
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert or replace chunks by identity; returns the number of entries
    /// written
    async fn upsert_chunks(&self, chunks: &[Chunk]) -> Result<usize>;

    /// Search for the `top_k` most similar chunks, ordered by descending
    /// similarity
    async fn search(&self, query_embedding: &[f32], top_k: usize)
        -> Result<Vec<VectorSearchResult>>;

    /// Total number of stored chunks
    async fn len(&self) -> Result<usize>;

    /// Check if the store has no entries
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Chunk counts per source document
    async fn document_counts(&self) -> Result<HashMap<String, usize>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
