use anyhow::{Context, Result};
use guide::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let summary = guide::run(&config).await.context("Failed to build park guide")?;

    if !summary.failed_ids.is_empty() {
        tracing::warn!(failed = ?summary.failed_ids, "Some parks were left out");
    }
    tracing::info!(
        output = %summary.output.display(),
        parks = summary.included,
        "Guide written"
    );
    Ok(())
}
