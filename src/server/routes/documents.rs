//! Document ingestion and listing endpoints

use axum::{extract::State, Json};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::ingestion::{find_pdf_files, metadata};
use crate::server::state::AppState;
use crate::types::{DocumentInfo, DocumentListResponse, IngestRequest, IngestResponse};

/// POST /api/v1/documents/ingest
///
/// Scans the configured directory for PDF files, runs each through the
/// pipeline, embeds the chunks, and upserts them into the vector index.
/// Re-ingesting an unchanged document replaces its chunks in place.
/// A directory containing no PDF files is a 404, not an empty success,
/// so a mispointed directory cannot masquerade as a completed ingestion.
pub async fn ingest(
    State(state): State<AppState>,
    body: Option<Json<IngestRequest>>,
) -> Result<Json<IngestResponse>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let dir = request
        .directory
        .map(PathBuf::from)
        .unwrap_or_else(|| state.config.ingestion.pdf_dir.clone());

    if !dir.is_dir() {
        return Err(Error::Validation(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let pdf_files = find_pdf_files(&dir);
    if pdf_files.is_empty() {
        return Err(Error::NotFound(format!(
            "No PDF documents found in {}",
            dir.display()
        )));
    }

    let mut documents_processed = 0;
    let mut chunks_created = 0;
    let mut pages_skipped = 0;

    for path in &pdf_files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(document = %name, "Ingesting document");

        let data = tokio::fs::read(path).await?;
        let processed = state.pipeline.process(&name, &data)?;

        let mut chunks = processed.chunks;
        let texts: Vec<String> = chunks
            .iter()
            .map(|chunk| metadata::build(chunk).0)
            .collect();
        let embeddings = state.embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let stored = state.store.upsert_chunks(&chunks).await?;

        documents_processed += 1;
        chunks_created += stored;
        pages_skipped += processed.stats.pages_skipped;
    }

    tracing::info!(
        documents = documents_processed,
        chunks = chunks_created,
        "Ingestion completed"
    );

    Ok(Json(IngestResponse {
        status: "completed".to_string(),
        documents_processed,
        chunks_created,
        pages_skipped,
    }))
}

/// GET /api/v1/documents
pub async fn list(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let counts = state.store.document_counts().await?;
    let total_chunks = counts.values().sum();

    let mut documents: Vec<DocumentInfo> = counts
        .into_iter()
        .map(|(filename, num_chunks)| DocumentInfo {
            filename,
            num_chunks,
        })
        .collect();
    documents.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(Json(DocumentListResponse {
        documents,
        total_chunks,
    }))
}
