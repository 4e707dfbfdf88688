//! Hierarchical chunking: one chunk per clause, article context threaded
//! across the whole document
//!
//! The running article context is an explicit fold accumulator: it is
//! passed into and returned from block processing, never shared global
//! state. A block containing several declarations switches context at each
//! one; clauses between two declarations carry the declaration that
//! precedes them, and the last declaration propagates forward to later
//! blocks.

use crate::ingestion::classify::{article_declaration_label, clause_marker_number};
use crate::types::{ArticleContext, Chunk, MergedBlock};

/// Outcome of chunking one document's blocks
#[derive(Debug, Default)]
pub struct ChunkOutcome {
    /// Chunks in document order
    pub chunks: Vec<Chunk>,
    /// Segments that trimmed to empty and were dropped
    pub empty_discarded: usize,
}

/// Splits merged blocks into per-clause chunks
pub struct HierarchicalChunker;

impl HierarchicalChunker {
    /// Chunk all blocks of a document, threading the article context from
    /// `context` through every block in order. Returns the outcome and the
    /// context as of the end of the document.
    pub fn chunk_blocks(
        source_document: &str,
        blocks: &[MergedBlock],
        mut context: ArticleContext,
    ) -> (ChunkOutcome, ArticleContext) {
        let mut outcome = ChunkOutcome::default();
        for block in blocks {
            context = Self::chunk_block(source_document, block, context, &mut outcome);
        }
        (outcome, context)
    }

    /// Chunk a single block, returning the updated context
    fn chunk_block(
        source_document: &str,
        block: &MergedBlock,
        mut context: ArticleContext,
        outcome: &mut ChunkOutcome,
    ) -> ArticleContext {
        let mut segment: Vec<&str> = Vec::new();
        let mut clause_number: Option<u32> = None;

        for line in block.text.lines() {
            if let Some(label) = article_declaration_label(line) {
                // The declaration closes the running segment under the old
                // context, then becomes the context itself; the heading line
                // is not clause body text
                Self::flush(
                    source_document,
                    block,
                    &context,
                    clause_number,
                    &mut segment,
                    outcome,
                );
                context.update(label);
                clause_number = None;
            } else if let Some(number) = clause_marker_number(line) {
                Self::flush(
                    source_document,
                    block,
                    &context,
                    clause_number,
                    &mut segment,
                    outcome,
                );
                clause_number = Some(number);
                segment.push(line);
            } else {
                segment.push(line);
            }
        }

        Self::flush(
            source_document,
            block,
            &context,
            clause_number,
            &mut segment,
            outcome,
        );
        context
    }

    /// Emit the accumulated segment as a chunk, or count it as discarded if
    /// it trims to empty
    fn flush(
        source_document: &str,
        block: &MergedBlock,
        context: &ArticleContext,
        clause_number: Option<u32>,
        segment: &mut Vec<&str>,
        outcome: &mut ChunkOutcome,
    ) {
        if segment.is_empty() {
            return;
        }
        let text = segment.join("\n").trim().to_string();
        segment.clear();

        if text.is_empty() {
            tracing::debug!(
                page = block.primary_page_index,
                "Discarding segment that trimmed to empty"
            );
            outcome.empty_discarded += 1;
            return;
        }

        outcome.chunks.push(Chunk {
            text,
            article_context: context.label.clone(),
            clause_number,
            page: block.primary_page_index,
            source_document: source_document.to_string(),
            merged_page_indices: block.merged_from.clone(),
            embedding: Vec::new(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(primary: u32, text: &str) -> MergedBlock {
        MergedBlock {
            primary_page_index: primary,
            text: text.to_string(),
            merged_from: Vec::new(),
        }
    }

    fn chunk_all(blocks: &[MergedBlock]) -> ChunkOutcome {
        let (outcome, _) =
            HierarchicalChunker::chunk_blocks("peraturan.pdf", blocks, ArticleContext::empty());
        outcome
    }

    #[test]
    fn article_with_two_clauses_yields_two_chunks() {
        let blocks = vec![block(
            12,
            "Pasal 14 Rencana Studi Semester\n(1) Setiap mahasiswa wajib menyusun rencana studi.\n(2) Batas maksimum SKS per semester adalah 24.",
        )];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks.len(), 2);
        for chunk in &outcome.chunks {
            assert_eq!(
                chunk.article_context.as_deref(),
                Some("Pasal 14 Rencana Studi Semester")
            );
            assert_eq!(chunk.page, 12);
        }
        assert_eq!(outcome.chunks[0].clause_number, Some(1));
        assert_eq!(outcome.chunks[1].clause_number, Some(2));
        assert!(outcome.chunks[0].text.starts_with("(1) Setiap mahasiswa"));
    }

    #[test]
    fn article_without_clause_markers_yields_one_untagged_chunk() {
        let blocks = vec![block(
            5,
            "Pasal 3 Tujuan\nPeraturan ini bertujuan menjamin mutu penyelenggaraan akademik.",
        )];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks.len(), 1);
        assert_eq!(outcome.chunks[0].clause_number, None);
        assert_eq!(outcome.chunks[0].article_context.as_deref(), Some("Pasal 3 Tujuan"));
    }

    #[test]
    fn context_propagates_to_blocks_without_declarations() {
        let blocks = vec![
            block(7, "Pasal 9 Kurikulum\n(1) Kurikulum ditetapkan oleh Senat."),
            block(8, "(2) Peninjauan kurikulum dilakukan lima tahun sekali."),
        ];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks.len(), 2);
        assert_eq!(
            outcome.chunks[1].article_context.as_deref(),
            Some("Pasal 9 Kurikulum")
        );
        assert_eq!(outcome.chunks[1].clause_number, Some(2));
        assert_eq!(outcome.chunks[1].page, 8);
    }

    #[test]
    fn multiple_declarations_switch_context_per_declaration() {
        let blocks = vec![block(
            20,
            "Pasal 30 Cuti Akademik\n(1) Cuti diajukan kepada Dekan.\nPasal 31 Pengunduran Diri\n(1) Pengunduran diri diajukan tertulis.",
        )];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks.len(), 2);
        assert_eq!(
            outcome.chunks[0].article_context.as_deref(),
            Some("Pasal 30 Cuti Akademik")
        );
        assert_eq!(
            outcome.chunks[1].article_context.as_deref(),
            Some("Pasal 31 Pengunduran Diri")
        );
        // The last declaration propagates forward
        let (_, context) = HierarchicalChunker::chunk_blocks(
            "peraturan.pdf",
            &blocks,
            ArticleContext::empty(),
        );
        assert_eq!(context.label.as_deref(), Some("Pasal 31 Pengunduran Diri"));
    }

    #[test]
    fn text_before_any_declaration_has_no_context() {
        let blocks = vec![block(2, "Ketentuan peralihan berlaku sejak tanggal ditetapkan.")];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks.len(), 1);
        assert_eq!(outcome.chunks[0].article_context, None);
        assert_eq!(outcome.chunks[0].clause_number, None);
    }

    #[test]
    fn no_chunk_is_empty_after_trimming() {
        let blocks = vec![block(4, "Pasal 5 Bahasa\n   \n(1) Bahasa pengantar adalah Bahasa Indonesia.")];
        let outcome = chunk_all(&blocks);
        assert!(outcome.chunks.iter().all(|c| !c.text.trim().is_empty()));
        // The whitespace-only pre-marker segment was dropped and counted
        assert_eq!(outcome.empty_discarded, 1);
        assert_eq!(outcome.chunks.len(), 1);
    }

    #[test]
    fn merged_block_provenance_is_stamped_on_chunks() {
        let blocks = vec![MergedBlock {
            primary_page_index: 9,
            text: "(1) Ayat yang menyeberangi batas halaman.".to_string(),
            merged_from: vec![10],
        }];
        let outcome = chunk_all(&blocks);
        assert_eq!(outcome.chunks[0].merged_page_indices, vec![10]);
        assert_eq!(outcome.chunks[0].page, 9);
    }
}
