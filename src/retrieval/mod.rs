//! Vector retrieval: the local cosine-similarity index

pub mod store;

pub use store::VectorIndex;
