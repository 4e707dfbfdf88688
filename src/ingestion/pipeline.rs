//! Ingestion pipeline orchestration
//!
//! Data flows strictly left to right: raw pages -> filtered pages -> merged
//! blocks -> per-clause chunks. Processing is sequential within a document;
//! the article context threading makes reordering incorrect. Parallelism is
//! only safe across documents.

use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::IngestionConfig;
use crate::error::Result;
use crate::types::{ArticleContext, Chunk, Page};

use super::chunker::HierarchicalChunker;
use super::extractor::PageExtractor;
use super::filter::PageFilter;
use super::merger::ContinuationMerger;

/// Per-document ingestion statistics, surfaced to operators so silent data
/// loss is detectable
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    /// Pages in the source document
    pub pages_total: usize,
    /// Pages discarded as corrupt, cover, or table of contents
    pub pages_skipped: usize,
    /// Chunks produced
    pub chunks_produced: usize,
    /// Segments dropped because they trimmed to empty
    pub empty_chunks_discarded: usize,
    /// First lines that fell back to the conservative continuation policy
    pub ambiguous_lines: usize,
}

/// Result of running the pipeline over one document
#[derive(Debug)]
pub struct ProcessedDocument {
    /// Chunks in document order, without embeddings yet
    pub chunks: Vec<Chunk>,
    /// Ingestion statistics
    pub stats: IngestStats,
}

/// Collect all PDF files under `dir`, sorted for a deterministic
/// ingestion order
pub fn find_pdf_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// The document-to-chunk pipeline
pub struct RegulationPipeline {
    filter: PageFilter,
    merger: ContinuationMerger,
}

impl RegulationPipeline {
    /// Create a pipeline with the given thresholds
    pub fn new(config: IngestionConfig) -> Self {
        let merger = ContinuationMerger::new(config.section_header_min_len);
        Self {
            filter: PageFilter::new(config),
            merger,
        }
    }

    /// Run the full pipeline over a PDF byte buffer
    pub fn process(&self, document_name: &str, data: &[u8]) -> Result<ProcessedDocument> {
        let pages = PageExtractor::extract(document_name, data)?;
        Ok(self.process_pages(document_name, &pages))
    }

    /// Run filtering, merging, and chunking over already-extracted pages
    pub fn process_pages(&self, document_name: &str, pages: &[Page]) -> ProcessedDocument {
        let filtered = self.filter.filter(pages);
        let merged = self.merger.merge(&filtered.pages);
        let (chunked, _context) = HierarchicalChunker::chunk_blocks(
            document_name,
            &merged.blocks,
            ArticleContext::empty(),
        );

        let stats = IngestStats {
            pages_total: pages.len(),
            pages_skipped: filtered.pages_skipped,
            chunks_produced: chunked.chunks.len(),
            empty_chunks_discarded: chunked.empty_discarded,
            ambiguous_lines: merged.ambiguous_lines,
        };

        tracing::info!(
            document = document_name,
            pages = stats.pages_total,
            pages_skipped = stats.pages_skipped,
            chunks = stats.chunks_produced,
            empty_discarded = stats.empty_chunks_discarded,
            ambiguous = stats.ambiguous_lines,
            "Document processed"
        );

        ProcessedDocument {
            chunks: chunked.chunks,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> RegulationPipeline {
        RegulationPipeline::new(IngestionConfig::default())
    }

    #[test]
    fn clause_split_by_page_break_is_chunked_whole() {
        let pages = vec![
            Page::new(
                2,
                "Pasal 20 Kelulusan\n(1) Gelar diberikan kepada mahasiswa yang telah menyelesaikan"
                    .to_string(),
            ),
            Page::new(3, "seluruh mata kuliah wajib.".to_string()),
        ];
        let processed = pipeline().process_pages("peraturan.pdf", &pages);
        assert_eq!(processed.chunks.len(), 1);
        let chunk = &processed.chunks[0];
        assert!(chunk
            .text
            .contains("yang telah menyelesaikan\nseluruh mata kuliah wajib."));
        assert_eq!(chunk.merged_page_indices, vec![3]);
        assert_eq!(chunk.article_context.as_deref(), Some("Pasal 20 Kelulusan"));
    }

    #[test]
    fn front_matter_produces_no_chunks() {
        let pages = vec![
            Page::new(
                0,
                "PERATURAN AKADEMIK\nINSTITUT TEKNOLOGI\nTAHUN 2024".to_string(),
            ),
            Page::new(
                1,
                "DAFTAR ISI\nBab I ....... 1\nBab II ....... 5\nBab III ....... 9".to_string(),
            ),
            Page::new(2, "Pasal 1 Umum\n(1) Dalam peraturan ini.".to_string()),
        ];
        let processed = pipeline().process_pages("peraturan.pdf", &pages);
        assert_eq!(processed.stats.pages_skipped, 2);
        assert!(processed.chunks.iter().all(|c| c.page == 2));
    }

    #[test]
    fn stats_reflect_counts() {
        let pages = vec![
            Page::new(0, "Pasal 1 Umum\n(1) Pertama.\n(2) Kedua.".to_string()),
            Page::corrupt(1),
            Page::new(2, "Pasal 2 Lain\n(1) Lagi.".to_string()),
        ];
        let processed = pipeline().process_pages("peraturan.pdf", &pages);
        assert_eq!(processed.stats.pages_total, 3);
        assert_eq!(processed.stats.pages_skipped, 1);
        assert_eq!(processed.stats.chunks_produced, 3);
    }

    #[test]
    fn pdf_scan_matches_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"x").unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let files = find_pdf_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn reprocessing_yields_identical_chunk_identities() {
        let pages = vec![Page::new(
            0,
            "Pasal 1 Umum\n(1) Pertama.\n(2) Kedua.".to_string(),
        )];
        let p = pipeline();
        let first: Vec<String> = p
            .process_pages("peraturan.pdf", &pages)
            .chunks
            .iter()
            .map(|c| c.identity_key())
            .collect();
        let second: Vec<String> = p
            .process_pages("peraturan.pdf", &pages)
            .chunks
            .iter()
            .map(|c| c.identity_key())
            .collect();
        assert_eq!(first, second);
    }
}
