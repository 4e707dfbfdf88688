//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

use super::document::Chunk;

/// A citation pointing back into the regulation corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Source document filename
    pub document: String,
    /// 1-based page number the cited clause originates from
    pub page: u32,
    /// Article heading, if the clause sits under one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    /// Clause number, absent for whole-article citations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<u32>,
    /// Leading snippet of the cited content
    pub content_snippet: String,
    /// Similarity score (0.0-1.0, higher is more similar)
    pub score: f32,
}

impl SourceCitation {
    /// Build a citation from a retrieved chunk and its similarity score
    pub fn from_chunk(chunk: &Chunk, score: f32) -> Self {
        Self {
            document: chunk.source_document.clone(),
            page: chunk.page + 1,
            article: chunk.article_context.clone(),
            clause: chunk.clause_number,
            content_snippet: snippet(&chunk.text, 200),
            score,
        }
    }

    /// Format for display, e.g. "Peraturan_Akademik_2024.pdf, Halaman 12,
    /// Pasal 14 Rencana Studi Semester, Ayat (1)"
    pub fn format_inline(&self) -> String {
        let mut parts = vec![self.document.clone(), format!("Halaman {}", self.page)];
        if let Some(article) = &self.article {
            parts.push(article.clone());
        }
        if let Some(clause) = self.clause {
            parts.push(format!("Ayat ({})", clause));
        }
        parts.join(", ")
    }
}

/// Truncate text to `max_len` characters on a char boundary
fn snippet(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_len).collect();
    format!("{}...", truncated.trim_end())
}

/// Response from a chat query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer
    pub answer: String,
    /// Citations supporting the answer
    pub sources: Vec<SourceCitation>,
    /// Model that produced the answer
    pub model: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub vector_store_ready: bool,
}

/// Response from document ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// "completed" on success
    pub status: String,
    /// Number of source documents processed
    pub documents_processed: usize,
    /// Total chunks created across all documents
    pub chunks_created: usize,
    /// Pages discarded as cover/ToC or corrupt, summed over documents
    pub pages_skipped: usize,
}

/// One entry in the document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub num_chunks: usize,
}

/// Response listing ingested documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentInfo>,
    pub total_chunks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_formats_full_provenance() {
        let chunk = Chunk {
            text: "(1) Setiap mahasiswa wajib menyusun rencana studi.".to_string(),
            article_context: Some("Pasal 14 Rencana Studi Semester".to_string()),
            clause_number: Some(1),
            page: 11,
            source_document: "Peraturan_Akademik_2024.pdf".to_string(),
            merged_page_indices: vec![],
            embedding: vec![],
        };
        let citation = SourceCitation::from_chunk(&chunk, 0.9);
        assert_eq!(
            citation.format_inline(),
            "Peraturan_Akademik_2024.pdf, Halaman 12, Pasal 14 Rencana Studi Semester, Ayat (1)"
        );
    }

    #[test]
    fn snippet_truncates_long_text() {
        let long = "a".repeat(300);
        let s = snippet(&long, 200);
        assert!(s.len() <= 203);
        assert!(s.ends_with("..."));
    }
}
