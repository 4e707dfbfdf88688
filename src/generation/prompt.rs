//! Prompt assembly for grounded question answering
//!
//! Prompts are written in Indonesian because the regulation corpus is
//! Indonesian; the instruction to answer in the language of the question
//! keeps English questions usable.

use crate::providers::vector_store::VectorSearchResult;
use crate::types::SourceCitation;

const SYSTEM_PROMPT: &str = "Anda adalah asisten akademik yang menjawab pertanyaan \
tentang peraturan akademik. Jawab HANYA berdasarkan konteks yang diberikan. \
Jika jawabannya tidak ada dalam konteks, katakan bahwa Anda tidak menemukan \
jawabannya dalam peraturan. Jawab dalam bahasa yang sama dengan pertanyaan. \
Sebutkan nomor Pasal dan Ayat yang relevan dalam jawaban Anda.";

/// Builds grounded prompts from retrieval results
pub struct PromptBuilder;

impl PromptBuilder {
    /// Format retrieval results into the context section of the prompt.
    ///
    /// Each chunk becomes a numbered source block carrying its provenance,
    /// so the model can cite `Pasal` and `Ayat` accurately.
    pub fn build_context(results: &[VectorSearchResult]) -> String {
        let mut context = String::new();
        for (i, result) in results.iter().enumerate() {
            let chunk = &result.chunk;
            context.push_str(&format!(
                "[Sumber {}: {}, Halaman {}",
                i + 1,
                chunk.source_document,
                chunk.page + 1
            ));
            if let Some(article) = &chunk.article_context {
                context.push_str(&format!(", {}", article));
            }
            if let Some(clause) = chunk.clause_number {
                context.push_str(&format!(", Ayat ({})", clause));
            }
            context.push_str("]\n");
            context.push_str(&chunk.text);
            context.push_str("\n\n");
        }
        context
    }

    /// Assemble the full generation prompt
    pub fn build_rag_prompt(question: &str, context: &str) -> String {
        format!(
            "{}\n\nKonteks:\n{}\nPertanyaan: {}\n\nJawaban:",
            SYSTEM_PROMPT, context, question
        )
    }

    /// Turn retrieval results into the citation list returned alongside
    /// the answer
    pub fn extract_sources(results: &[VectorSearchResult]) -> Vec<SourceCitation> {
        results
            .iter()
            .map(|r| SourceCitation::from_chunk(&r.chunk, r.similarity))
            .collect()
    }
}
