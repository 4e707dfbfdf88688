//! Document-to-chunk ingestion pipeline

pub mod chunker;
pub mod classify;
pub mod extractor;
pub mod filter;
pub mod merger;
pub mod metadata;
pub mod pipeline;

pub use chunker::HierarchicalChunker;
pub use classify::LineClass;
pub use extractor::PageExtractor;
pub use filter::PageFilter;
pub use merger::ContinuationMerger;
pub use pipeline::{find_pdf_files, IngestStats, ProcessedDocument, RegulationPipeline};
