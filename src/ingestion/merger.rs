//! Continuation detection and page merging
//!
//! A clause's text may be split by a page break; chunking per page would
//! truncate it. The merger folds pages whose first non-empty line reads as
//! a mid-sentence continuation into the preceding block, guaranteeing that
//! any clause spanning a page boundary lands in exactly one block.

use crate::ingestion::classify::{classify_line, is_ambiguous_continuation, LineClass};
use crate::types::{FilteredPage, MergedBlock};

/// Outcome of merging one document's filtered pages
#[derive(Debug)]
pub struct MergeOutcome {
    /// Blocks in document order
    pub blocks: Vec<MergedBlock>,
    /// First lines that could not be confidently classified and fell back
    /// to the conservative continuation policy
    pub ambiguous_lines: usize,
}

/// Folds continuation pages into their preceding block
pub struct ContinuationMerger {
    section_header_min_len: usize,
}

impl ContinuationMerger {
    /// Create a merger; `section_header_min_len` tunes the all-caps header
    /// predicate
    pub fn new(section_header_min_len: usize) -> Self {
        Self {
            section_header_min_len,
        }
    }

    /// Merge a filtered page sequence into blocks
    pub fn merge(&self, pages: &[FilteredPage]) -> MergeOutcome {
        let mut blocks = Vec::new();
        let mut ambiguous_lines = 0usize;
        let mut current: Option<MergedBlock> = None;

        for page in pages {
            let Some(block) = current.as_mut() else {
                current = Some(MergedBlock::new(page));
                continue;
            };

            // Merging only ever absorbs the immediate next page; a gap left
            // by a discarded page forces a new block
            let contiguous = page.index == block.last_page_index() + 1;

            let first_line = page.text.lines().find(|l| !l.trim().is_empty());
            let Some(first_line) = first_line else {
                // No non-empty lines: continuation-only noise, folded
                // without reclassification
                if contiguous {
                    block.absorb(page);
                } else {
                    blocks.push(current.take().expect("block present"));
                    current = Some(MergedBlock::new(page));
                }
                continue;
            };

            let class = classify_line(first_line, self.section_header_min_len);
            if contiguous && class == LineClass::Continuation {
                if is_ambiguous_continuation(first_line) {
                    tracing::debug!(
                        page = page.index,
                        line = first_line,
                        "Ambiguous first line, treating as continuation"
                    );
                    ambiguous_lines += 1;
                }
                block.absorb(page);
            } else {
                blocks.push(current.take().expect("block present"));
                current = Some(MergedBlock::new(page));
            }
        }

        if let Some(block) = current {
            blocks.push(block);
        }

        MergeOutcome {
            blocks,
            ambiguous_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merger() -> ContinuationMerger {
        ContinuationMerger::new(4)
    }

    fn page(index: u32, text: &str) -> FilteredPage {
        FilteredPage {
            index,
            text: text.to_string(),
        }
    }

    #[test]
    fn lowercase_start_merges_into_previous_page() {
        let pages = vec![
            page(3, "(1) Gelar diberikan kepada mahasiswa yang telah menyelesaikan"),
            page(4, "seluruh mata kuliah wajib."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 1);
        let block = &outcome.blocks[0];
        assert_eq!(block.primary_page_index, 3);
        assert_eq!(block.merged_from, vec![4]);
        assert!(block
            .text
            .contains("yang telah menyelesaikan\nseluruh mata kuliah wajib."));
    }

    #[test]
    fn article_declaration_starts_a_new_block() {
        let pages = vec![
            page(3, "(1) Ayat pertama."),
            page(4, "Pasal 15 Beban Studi\n(1) Beban studi normal."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 2);
        assert!(outcome.blocks[1].merged_from.is_empty());
    }

    #[test]
    fn clause_marker_and_section_header_start_new_blocks() {
        let pages = vec![
            page(0, "Pasal 1 Umum\n(1) Pertama."),
            page(1, "(2) Kedua dimulai di halaman baru."),
            page(2, "BAB II KURIKULUM"),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 3);
    }

    #[test]
    fn empty_page_folds_into_current_block() {
        let pages = vec![
            page(0, "Pasal 1 Umum\n(1) Pertama belum selesai"),
            page(1, ""),
            page(2, "dan berlanjut di sini."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.blocks[0].merged_from, vec![1, 2]);
    }

    #[test]
    fn gap_from_discarded_page_prevents_merging() {
        // Page 2 was discarded by the filter; page 3 may not be absorbed
        // even though it reads like a continuation
        let pages = vec![
            page(1, "(1) Ayat yang terpotong oleh"),
            page(3, "halaman yang dibuang."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 2);
        assert!(outcome.blocks.iter().all(|b| b.merged_from.is_empty()));
    }

    #[test]
    fn uppercase_prose_counts_as_ambiguous_but_still_merges() {
        let pages = vec![
            page(0, "(1) Ketentuan mengenai wisuda diatur oleh"),
            page(1, "Rektor melalui keputusan tersendiri."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.ambiguous_lines, 1);
    }

    #[test]
    fn merged_from_is_contiguous_ascending() {
        let pages = vec![
            page(5, "(1) Awal kalimat yang"),
            page(6, "terus bersambung dan"),
            page(7, "akhirnya selesai."),
        ];
        let outcome = merger().merge(&pages);
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.blocks[0].merged_from, vec![6, 7]);
    }
}
