use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trivia_service::prelude::*;

/// trivia-service - HTTP API for trivia questions and categories
#[derive(Parser)]
#[command(name = "trivia-service")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file layered above the standard locations
    #[arg(short, long, env = "TRIVIA_CONFIG")]
    config: Option<PathBuf>,

    /// Override `service.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        Config::load_with(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.service.port = port;
    }

    init_tracing(&config)?;

    let state = AppState::from_config(config.clone())
        .await
        .context("failed to initialize store")?;

    Server::new(config).serve(router(state)).await?;

    Ok(())
}
