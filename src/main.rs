//! tempcast - print current and 15-minutely temperature forecasts
//!
//! Issues one forecast request (served from the local cache while fresh),
//! prints location and current conditions, then the 15-minutely table.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tempcast::cache::CacheManager;
use tempcast::cli::{Cli, RunConfig};
use tempcast::data::ForecastClient;
use tempcast::report::render_report;

/// Installs the stderr log subscriber, honouring `RUST_LOG` (default `warn`)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::from_cli(cli)?;

    let cache = match config.cache_dir {
        Some(dir) => Some(CacheManager::with_dir(dir)),
        None => CacheManager::new(),
    };
    match &cache {
        Some(cache) => tracing::debug!(dir = %cache.dir().display(), "Using response cache"),
        None => tracing::warn!("No cache directory available, responses will not be cached"),
    }

    let client = ForecastClient::new(cache);
    let forecast = client.fetch_forecast(&config.request).await?;

    println!("{}", render_report(&forecast)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
