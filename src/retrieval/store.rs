//! In-process vector index with JSON persistence
//!
//! Chunks are keyed by their identity hash, so re-ingesting an unchanged
//! document overwrites entries in place instead of duplicating them. The
//! whole index is held in memory and flushed to a JSON file after every
//! mutation; reads never touch the disk.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::providers::vector_store::{VectorSearchResult, VectorStoreProvider};
use crate::types::Chunk;

/// Persisted form of the index
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    /// When the index was last written
    #[serde(default)]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
    chunks: HashMap<String, Chunk>,
}

/// Local vector index backed by a JSON file
pub struct VectorIndex {
    path: PathBuf,
    inner: RwLock<HashMap<String, Chunk>>,
}

impl VectorIndex {
    /// Open the index at the given path, loading any existing contents
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let chunks = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: IndexFile = serde_json::from_str(&content)
                .map_err(|e| Error::VectorStore(format!("Corrupt index file: {}", e)))?;
            tracing::info!(
                "Loaded vector index with {} chunks from {}",
                file.chunks.len(),
                path.display()
            );
            file.chunks
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            inner: RwLock::new(chunks),
        })
    }

    /// Create an empty in-memory index for tests
    #[cfg(test)]
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn persist(&self, chunks: &HashMap<String, Chunk>) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = IndexFile {
            updated_at: Some(chrono::Utc::now()),
            chunks: chunks.clone(),
        };
        let json = serde_json::to_string(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Cosine similarity between two vectors; zero when either has zero norm
/// or the dimensions disagree
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[async_trait]
impl VectorStoreProvider for VectorIndex {
    async fn upsert_chunks(&self, chunks: &[Chunk]) -> Result<usize> {
        // Validate up front so a bad chunk cannot leave the in-memory map
        // diverged from the persisted file
        if let Some(chunk) = chunks.iter().find(|c| c.embedding.is_empty()) {
            return Err(Error::VectorStore(format!(
                "Refusing to store a chunk without an embedding (from {})",
                chunk.source_document
            )));
        }

        let mut guard = self.inner.write();
        for chunk in chunks {
            guard.insert(chunk.identity_key(), chunk.clone());
        }
        self.persist(&guard)?;
        Ok(chunks.len())
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<VectorSearchResult>> {
        let guard = self.inner.read();
        let mut results: Vec<VectorSearchResult> = guard
            .values()
            .map(|chunk| VectorSearchResult {
                similarity: cosine_similarity(query, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        Ok(results)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.inner.read().len())
    }

    async fn document_counts(&self) -> Result<HashMap<String, usize>> {
        let guard = self.inner.read();
        let mut counts = HashMap::new();
        for chunk in guard.values() {
            *counts.entry(chunk.source_document.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn name(&self) -> &str {
        "local-json"
    }
}
