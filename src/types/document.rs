//! Pipeline data model: pages, merged blocks, and clause chunks

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A raw page as produced by the extractor. Immutable after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based index of the page in the source document
    pub index: u32,
    /// Raw text content of the page
    pub text: String,
    /// Set when the page could not be decoded; text is empty in that case
    pub corrupt: bool,
}

impl Page {
    /// Create a page with decoded text
    pub fn new(index: u32, text: String) -> Self {
        Self {
            index,
            text,
            corrupt: false,
        }
    }

    /// Create a placeholder for a page that failed to decode
    pub fn corrupt(index: u32) -> Self {
        Self {
            index,
            text: String::new(),
            corrupt: true,
        }
    }
}

/// A page that survived cover/ToC filtering, with headers and footers
/// stripped. The original page index is preserved so downstream provenance
/// stays correct even though some indices are absent from the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredPage {
    /// Original page index from the source document (not renumbered)
    pub index: u32,
    /// Page text with boilerplate lines removed
    pub text: String,
}

/// One or more consecutive pages merged so that no clause is split at a
/// page boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBlock {
    /// Index of the page the block starts on
    pub primary_page_index: u32,
    /// Concatenated text of the primary page and any continuation pages
    pub text: String,
    /// Indices of pages folded into this block, excluding the primary.
    /// Strictly increasing; each index is the immediate successor of the
    /// previous one.
    pub merged_from: Vec<u32>,
}

impl MergedBlock {
    /// Start a new block at the given page
    pub fn new(page: &FilteredPage) -> Self {
        Self {
            primary_page_index: page.index,
            text: page.text.clone(),
            merged_from: Vec::new(),
        }
    }

    /// Fold a continuation page into the block
    pub fn absorb(&mut self, page: &FilteredPage) {
        if !self.text.is_empty() && !page.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(&page.text);
        self.merged_from.push(page.index);
    }

    /// Index of the last page contributing to this block
    pub fn last_page_index(&self) -> u32 {
        self.merged_from
            .last()
            .copied()
            .unwrap_or(self.primary_page_index)
    }
}

/// The running article context threaded through chunk production.
///
/// Overwritten whenever a new article declaration (e.g. "Pasal 14 Rencana
/// Studi Semester") is detected, otherwise carried forward unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleContext {
    /// Label of the most recent article declaration, if any
    pub label: Option<String>,
}

impl ArticleContext {
    /// Context before any article declaration has been seen
    pub fn empty() -> Self {
        Self { label: None }
    }

    /// Replace the context with a new declaration label
    pub fn update(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }
}

/// The terminal, immutable unit handed to the embedding stage: one clause,
/// or a whole article when no clause markers exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Clause or article body text, trimmed, never empty
    pub text: String,
    /// Nearest-preceding article heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_context: Option<String>,
    /// Clause number from the `(n)` marker; absent for whole-article chunks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_number: Option<u32>,
    /// Page the clause text originates from (primary page of its block)
    pub page: u32,
    /// Source document name for citations
    pub source_document: String,
    /// Pages folded into the originating block, empty if no merge occurred
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_page_indices: Vec<u32>,
    /// Embedding vector, filled in by the embedding stage
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Stable identity for storage, derived from the provenance fields so
    /// that re-ingesting an unchanged document upserts instead of
    /// duplicating
    pub fn identity_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source_document.as_bytes());
        hasher.update([0]);
        hasher.update(self.page.to_le_bytes());
        hasher.update([0]);
        match self.clause_number {
            Some(n) => hasher.update(n.to_le_bytes()),
            None => hasher.update(u32::MAX.to_le_bytes()),
        }
        hasher.update([0]);
        hasher.update(self.article_context.as_deref().unwrap_or("").as_bytes());
        hex::encode(hasher.finalize())
    }
}
