//! voxpad - Main Entry Point
//!
//! Supports two modes:
//! - Capture mode (default): interactive input pad that relays submissions
//! - Serve mode (run with --serve): the logging relay endpoint

use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voxpad::{capture, relay, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let serve_mode = args.iter().any(|a| a == "--serve" || a == "-s");
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    init_logging(verbose);

    info!("Starting voxpad v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default()?;
    info!("Configuration loaded");

    if serve_mode {
        relay::server::serve(&config.relay).await
    } else {
        capture::run(config).await
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "voxpad=debug" } else { "voxpad=info" };

    // Logs go to stderr so the capture prompt owns stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
