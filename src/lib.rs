//! tanya-akademik: question answering over academic regulation documents
//!
//! This crate ingests paginated regulation PDFs (Peraturan Akademik), turns
//! them into clause-level retrieval units that respect the documents' legal
//! hierarchy (Pasal -> Ayat), and answers natural-language questions grounded
//! in the retrieved passages, with citations back to document, page, article
//! and clause.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, FilteredPage, MergedBlock, Page},
    query::ChatRequest,
    response::{ChatResponse, SourceCitation},
};
