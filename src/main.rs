//! Oralscope Dashboard Server
//!
//! Run with: cargo run --bin oralscope
//!
//! # Configuration
//!
//! Reads `--config FILE` if given, otherwise the first config.toml found in
//! the default locations. Environment variables override either:
//! - `ORALSCOPE_DATASET_URL`: Dataset URL (default: published workbook)
//! - `ORALSCOPE_DATASET_PATH`: Local dataset file, used instead of the URL
//! - `ORALSCOPE_HOST`: Host to bind to (default: 127.0.0.1)
//! - `ORALSCOPE_PORT`: Port to listen on (default: 8050)
//! - `ORALSCOPE_LOG_LEVEL`: Log level (default: info)
//! - `ORALSCOPE_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use anyhow::Context;
use clap::{Parser, Subcommand};
use oralscope::api::{serve, ApiConfig, AppState};
use oralscope::config::{generate_default_config, Config, LoggingConfig};
use oralscope::dataset::{load, DatasetSource, FileSource, HttpSource};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "oralscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dental health outcomes, fluoridation and unmet dental needs across U.S. states")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and serve the dashboard (default)
    Serve,
    /// Print a default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Starting Oralscope dashboard v{}", env!("CARGO_PKG_VERSION"));

    let source: Box<dyn DatasetSource> = match &config.dataset.path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(
            config.dataset.url.clone(),
            Duration::from_secs(config.dataset.request_timeout_secs),
        )?),
    };

    let dataset = load(source.as_ref())
        .await
        .with_context(|| format!("Failed to load dataset from {}", source.describe()))?;

    let api_config = ApiConfig::from(config.server.clone());
    let state = AppState::new(dataset, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Oralscope dashboard stopped");
    Ok(())
}

/// Initialize tracing; `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "oralscope={level},tower_http={level}",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
