//! Batch ingestion binary: chunk the regulation PDFs and fill the vector
//! index without going through the HTTP API. Optionally exports the
//! produced chunks to a JSON file for inspection.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tanya_akademik::ingestion::{find_pdf_files, metadata, RegulationPipeline};
use tanya_akademik::providers::{EmbeddingProvider, OllamaClient, OllamaEmbedder, VectorStoreProvider};
use tanya_akademik::retrieval::VectorIndex;
use tanya_akademik::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tanya-akademik-ingest",
    about = "Ingest regulation PDFs into the vector index"
)]
struct IngestCli {
    /// Directory containing the regulation PDFs (defaults to the
    /// configured directory)
    #[arg(long)]
    pdf_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "TANYA_AKADEMIK_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Also export the produced chunks to a JSON file
    #[arg(long, default_value_t = false)]
    export_json: bool,

    /// Path of the JSON export
    #[arg(long, default_value = "./output/chunks.json")]
    json_output: PathBuf,

    /// Only export JSON; skip embedding and the vector index
    #[arg(long, default_value_t = false)]
    export_json_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tanya_akademik=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = IngestCli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let pdf_dir = cli
        .pdf_dir
        .unwrap_or_else(|| config.ingestion.pdf_dir.clone());
    let pdf_files = find_pdf_files(&pdf_dir);
    if pdf_files.is_empty() {
        bail!("No PDF documents found in {}", pdf_dir.display());
    }

    let pipeline = RegulationPipeline::new(config.ingestion.clone());
    let mut all_chunks = Vec::new();
    let mut pages_skipped = 0;
    for path in &pdf_files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let processed = pipeline.process(&name, &data)?;
        pages_skipped += processed.stats.pages_skipped;
        all_chunks.extend(processed.chunks);
    }

    tracing::info!(
        documents = pdf_files.len(),
        chunks = all_chunks.len(),
        pages_skipped,
        "Pipeline finished"
    );

    if cli.export_json || cli.export_json_only {
        let records: Vec<_> = all_chunks
            .iter()
            .map(|chunk| metadata::build(chunk).1)
            .collect();
        let export = serde_json::json!({
            "total_chunks": records.len(),
            "chunks": records,
        });
        if let Some(parent) = cli.json_output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&cli.json_output, serde_json::to_string_pretty(&export)?)?;
        tracing::info!(
            chunks = records.len(),
            path = %cli.json_output.display(),
            "Exported chunks to JSON"
        );
    }

    if !cli.export_json_only {
        let ollama = Arc::new(OllamaClient::new(&config.llm)?);
        let embedder = OllamaEmbedder::from_client(ollama, config.llm.embed_dimensions);
        let store = VectorIndex::open(&config.store.index_path)
            .context("Failed to open vector index")?;

        let texts: Vec<String> = all_chunks
            .iter()
            .map(|chunk| metadata::build(chunk).0)
            .collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in all_chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let stored = store.upsert_chunks(&all_chunks).await?;
        tracing::info!(
            chunks = stored,
            index = %config.store.index_path.display(),
            "Ingestion completed"
        );
    }

    Ok(())
}
