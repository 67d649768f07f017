use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use promptdeck::init_logging;
use promptdeck_config::{GatewayConfig, load_config};
use std::path::PathBuf;

/// Streaming instruction-batch gateway for chat completions.
#[derive(Debug, Parser)]
#[command(name = "promptdeck", version)]
struct Args {
    /// Path to a JSON5 config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the listen address from config.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    info!(
        "starting promptdeck (bind={}, store={})",
        config.server.bind, config.store.path
    );

    promptdeck_server::serve(config).await
}
