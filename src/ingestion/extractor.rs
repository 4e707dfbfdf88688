//! Per-page PDF text extraction

use lopdf::Document;

use crate::error::{Error, Result};
use crate::types::Page;

/// Extracts raw per-page text from a PDF byte buffer.
///
/// Produces one `Page` per physical page in ascending index order. A page
/// that fails to decode is emitted empty and flagged instead of aborting
/// the whole document; an unreadable document is an `Error::Extraction`.
/// Extraction is deterministic: the same bytes yield the same sequence.
pub struct PageExtractor;

impl PageExtractor {
    /// Extract all pages of a document
    pub fn extract(document_name: &str, data: &[u8]) -> Result<Vec<Page>> {
        let doc = Document::load_mem(data)
            .map_err(|e| Error::extraction(document_name, format!("Failed to load PDF: {}", e)))?;

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();

        if page_numbers.is_empty() {
            return Err(Error::extraction(document_name, "PDF contains no pages"));
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for (index, page_number) in page_numbers.iter().enumerate() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(Page::new(index as u32, normalize_page_text(&text))),
                Err(e) => {
                    tracing::warn!(
                        document = document_name,
                        page = index,
                        "Could not decode page: {}",
                        e
                    );
                    pages.push(Page::corrupt(index as u32));
                }
            }
        }

        Ok(pages)
    }
}

/// Trim each line and drop blank lines; lopdf output carries stray spacing
/// and null characters from font programs
fn normalize_page_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
