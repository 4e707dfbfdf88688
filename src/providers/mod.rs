//! Provider abstractions for embeddings, answer generation, and vector
//! storage
//!
//! The pipeline treats all three as external collaborators behind traits,
//! so the HTTP layer and tests can swap implementations freely.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
pub use vector_store::{VectorSearchResult, VectorStoreProvider};
