use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use weather_core::{Config, config::API_KEY_ENV, provider_from_config};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Weather web front-end")]
pub struct Cli {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "WEATHER_LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// TOML config file; defaults to the platform config directory.
    #[arg(long, env = "WEATHER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref()).context("Failed to load configuration")?;

        if !config.has_api_key() {
            warn!("{API_KEY_ENV} is not set; every upstream lookup will fail");
        }
        info!(base_url = %config.base_url, "using OpenWeather endpoint");

        let provider = provider_from_config(&config);
        server::run(self.listen, provider).await
    }
}
