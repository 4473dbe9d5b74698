//! Rover binary: CLI commands and gateway bootstrap.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;

use rover_agent::QueryPipeline;
use rover_core::Config;
use rover_gateway::GatewayServer;
use rover_index::ingest::{IngestorConfig, RepoIngestor};
use rover_index::store::ChunkStore;
use rover_llm::any::{AnyCompleter, AnyEmbedder};
use rover_llm::gemini::GeminiProvider;
use rover_llm::hugging_face::HuggingFaceProvider;

#[derive(Parser)]
#[command(name = "rover", version, about = "Retrieval-augmented code question answering")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "rover.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the browser UI and HTTP endpoints.
    Serve,
    /// Clone and index one repository.
    Ingest { repo_url: String },
    /// Ask a question over everything ingested so far.
    Ask { question: String },
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

struct Components {
    ingestor: Arc<RepoIngestor>,
    pipeline: Arc<QueryPipeline>,
}

async fn build_components(config: &Config) -> anyhow::Result<Components> {
    let store = ChunkStore::connect(&config.database.url)
        .await
        .context("failed to connect to the datastore")?;

    let embedder = Arc::new(AnyEmbedder::Gemini(GeminiProvider::new(
        config.embedding.api_key.clone(),
        config.embedding.base_url.clone(),
        config.embedding.model.clone(),
    )));
    let completer = Arc::new(AnyCompleter::HuggingFace(HuggingFaceProvider::new(
        config.completion.api_token.clone(),
        config.completion.base_url.clone(),
        config.completion.model.clone(),
        config.completion.temperature,
        config.completion.max_new_tokens,
    )));

    let ingestor = Arc::new(RepoIngestor::new(
        store.clone(),
        Arc::clone(&embedder),
        IngestorConfig {
            chunk_size: config.ingest.chunk_size,
            overlap: config.ingest.overlap,
        },
    ));
    let pipeline = Arc::new(QueryPipeline::new(
        store,
        embedder,
        completer,
        config.retrieval.limit,
    ));

    Ok(Components { ingestor, pipeline })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    config.validate()?;

    let components = build_components(&config).await?;

    match cli.command {
        Command::Serve => {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = shutdown_tx.send(true);
                }
            });

            GatewayServer::new(
                &config.gateway.bind,
                config.gateway.port,
                components.ingestor,
                components.pipeline,
                shutdown_rx,
            )
            .serve()
            .await?;
        }
        Command::Ingest { repo_url } => {
            let report = components.ingestor.ingest(&repo_url).await?;
            println!(
                "Ingestion complete: {} chunks embedded, {} skipped \
                 ({} objects from {} files in {} ms).",
                report.chunks_embedded,
                report.chunks_skipped,
                report.objects_extracted,
                report.files_scanned,
                report.duration_ms
            );
        }
        Command::Ask { question } => {
            let answer = components.pipeline.answer(&question).await?;
            println!("{answer}");
        }
    }

    Ok(())
}
