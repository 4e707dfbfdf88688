//! Configuration for the regulation QA service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Ingestion pipeline configuration
    #[serde(default)]
    pub ingestion: IngestionConfig,
    /// Vector index persistence configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// any section the file omits
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load from the given path if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub embed_dimensions: usize,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_dimensions: 768,
            generate_model: "llama3.2:3b".to_string(),
            temperature: 0.1,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per query
    pub top_k: usize,
    /// Maximum question length in characters
    pub max_question_len: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 7,
            max_question_len: 1000,
        }
    }
}

/// Ingestion pipeline configuration
///
/// The thresholds tune the heuristic classifiers in the page filter and
/// continuation merger. The defaults are calibrated for the Peraturan
/// Akademik books this service was built around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Directory containing the regulation PDFs
    pub pdf_dir: PathBuf,
    /// Only pages with index below this are candidates for cover/ToC discard
    pub front_matter_pages: u32,
    /// A normalised line repeating on at least this fraction of pages is
    /// treated as a header/footer
    pub header_repeat_ratio: f64,
    /// Header/footer detection needs at least this many pages to compare
    pub header_min_pages: usize,
    /// Minimum length for an all-caps line to count as a section header
    pub section_header_min_len: usize,
    /// Fraction of dotted-leader/numeric lines above which a front-matter
    /// page is classified as a table of contents
    pub toc_line_ratio: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("./data/pdfs"),
            front_matter_pages: 5,
            header_repeat_ratio: 0.5,
            header_min_pages: 3,
            section_header_min_len: 4,
            toc_line_ratio: 0.4,
        }
    }
}

/// Vector index persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON index file
    pub index_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./data/index.json"),
        }
    }
}
