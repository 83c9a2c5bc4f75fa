use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;

use exa_rag::cli::Cli;
use exa_rag::config::env_lookup;
use exa_rag::pipeline::Orchestrator;
use exa_rag::transport::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let level = if std::env::var_os("EXA_RAG_DEBUG").is_some() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout is reserved for the progress lines and the answer
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    dotenv().ok(); // Load .env file if present
    let orchestrator = Orchestrator::bootstrap(env_lookup, Arc::new(ReqwestTransport::new()))?;

    let mut stdout = std::io::stdout();
    orchestrator.run(&cli.query, &cli.pipeline(), &mut stdout).await?;
    Ok(())
}
