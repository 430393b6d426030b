//! HTTP server for the COVID-19 area API.
//!
//! Serves `GetData` (and its aliases) backed by a dataset fetched over HTTP
//! or read from a local file on every request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

use covid_areas::config::Config;
use covid_areas::source::{ConfiguredSource, FileDatasetSource, HttpDatasetSource};
use covid_areas::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "COVID-19 area data server")]
struct Args {
    /// Optional TOML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (default 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<String>,

    /// URL of the JSON world dataset
    #[arg(long, conflicts_with = "dataset_file")]
    dataset_url: Option<String>,

    /// Local JSON world dataset
    #[arg(long)]
    dataset_file: Option<PathBuf>,

    /// Dataset download timeout in seconds (default 30)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Maximum log level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    info!("COVID-19 Area Server");

    let source = build_source(&args, &config)?;
    info!("Dataset source: {}", source);

    let state = Arc::new(AppState::new(source));
    let app = router(state);

    let listen = args.listen.as_deref().unwrap_or(config.listen());
    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Pick the dataset source. Flags win over the config file as a pair, so a
/// `--dataset-file` never combines with a URL from the file.
fn build_source(args: &Args, config: &Config) -> Result<ConfiguredSource> {
    let (url, file) = if args.dataset_url.is_some() || args.dataset_file.is_some() {
        (args.dataset_url.clone(), args.dataset_file.clone())
    } else {
        (config.dataset.url.clone(), config.dataset.file.clone())
    };

    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(config.timeout_secs()));

    match (url, file) {
        (Some(url), None) => {
            let url = Url::parse(&url).with_context(|| format!("Invalid dataset URL '{}'", url))?;
            let source = HttpDatasetSource::new(url, timeout).context("Failed to create HTTP client")?;
            Ok(ConfiguredSource::Http(source))
        }
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Dataset file {} does not exist", path.display());
            }
            Ok(ConfiguredSource::File(FileDatasetSource::new(path)))
        }
        (Some(_), Some(_)) => anyhow::bail!("Configure either a dataset URL or a dataset file, not both"),
        (None, None) => anyhow::bail!("No dataset configured: pass --dataset-url or --dataset-file"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
