use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logylyzer_agent::config::{AgentConfig, DEFAULT_CONFIG_PATH};
use logylyzer_agent::runner;

/// Follow host logs and send error lines to the log analyzer.
#[derive(Debug, Parser)]
#[command(name = "logylyzer-agent", version)]
struct Args {
    /// Path to the YAML config file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = AgentConfig::load(&args.config)?;
    tracing::info!(config = %args.config.display(), "config loaded");

    runner::run(config).await?;
    Ok(())
}
