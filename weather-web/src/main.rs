//! Binary crate for the `weather-web` front-end.
//!
//! This crate focuses on:
//! - Startup: `.env`, logging, configuration
//! - HTTP routes (`/`, `/forecast/{city}`)
//! - HTML rendering of weather records

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
