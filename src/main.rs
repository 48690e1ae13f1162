use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sol_core::RagConfig;
use sol_gateway::AppState;
use sol_openai::OpenAiClient;
use sol_rag::{FlatL2Index, RetrievalEngine};

#[derive(Parser)]
#[command(name = "solyntra")]
#[command(about = "Retrieval-augmented question answering over uploaded documents", long_about = None)]
struct Cli {
    /// Hostname or IP address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let rag_config = RagConfig::from_env()?;
    let client = Arc::new(OpenAiClient::from_env()?);
    if client.config().api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; uploads will fail until it is set");
    }

    let engine = RetrievalEngine::new(
        &rag_config,
        client.clone(),
        client.clone(),
        client.config().generation_config(),
        Arc::new(FlatL2Index::new(rag_config.embedding_dimension)),
    );
    info!(
        chunk_size = rag_config.chunk_size,
        overlap = rag_config.chunk_overlap,
        top_k = rag_config.top_k,
        "Retrieval engine ready"
    );

    sol_gateway::start(&cli.host, cli.port, AppState::new(Arc::new(engine))).await?;

    Ok(())
}
