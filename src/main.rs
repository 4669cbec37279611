use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use statewatch::{StatewatchConfig, logging, web};

/// Per-state air quality, weather and photo service
#[derive(Debug, Parser)]
#[command(name = "statewatch", version, about)]
struct Cli {
    /// Path to a TOML config file (default: config/default.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StatewatchConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!("Loaded configuration: {:?}", config.server);

    web::run(&config).await
}
