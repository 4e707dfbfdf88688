//! Chunk metadata building for the embedding stage

use serde_json::json;
use std::collections::HashMap;

use crate::types::Chunk;

/// Pure function from a chunk to its embeddable text and storage metadata.
///
/// The embeddable text is prefixed with the article-context label so the
/// embedding captures hierarchical context even without a metadata lookup
/// at retrieval time. Deterministic given identical input.
pub fn build(chunk: &Chunk) -> (String, HashMap<String, serde_json::Value>) {
    let embeddable_text = match &chunk.article_context {
        Some(label) if !chunk.text.starts_with(label.as_str()) => {
            format!("{}\n{}", label, chunk.text)
        }
        _ => chunk.text.clone(),
    };

    let mut record = HashMap::new();
    record.insert("content".to_string(), json!(chunk.text));
    record.insert("source_document".to_string(), json!(chunk.source_document));
    record.insert("page".to_string(), json!(chunk.page));
    if let Some(article) = &chunk.article_context {
        record.insert("article_context".to_string(), json!(article));
    }
    if let Some(clause) = chunk.clause_number {
        record.insert("clause_number".to_string(), json!(clause));
    }
    if !chunk.merged_page_indices.is_empty() {
        record.insert(
            "merged_page_indices".to_string(),
            json!(chunk.merged_page_indices),
        );
    }

    (embeddable_text, record)
}
