//! Core types for the regulation QA system

pub mod document;
pub mod query;
pub mod response;

pub use document::{ArticleContext, Chunk, FilteredPage, MergedBlock, Page};
pub use query::{ChatRequest, IngestRequest};
pub use response::{
    ChatResponse, DocumentInfo, DocumentListResponse, HealthResponse, IngestResponse,
    SourceCitation,
};
