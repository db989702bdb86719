//! linkboard — opaque-id route resolution service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                 LINKBOARD                      │
//!                    │                                                │
//!   GET /c/{token}   │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│  ident   │  │
//!                    │  │ server  │    │  binder  │    │  codec   │  │
//!                    │  └─────────┘    └────┬─────┘    └──────────┘  │
//!                    │                      │                        │
//!                    │                      ▼                        │
//!   JSON view        │                ┌──────────┐     ┌──────────┐  │
//!   ◀────────────────┼────────────────│  store   │◀────│  seed    │  │
//!                    │                │directory │     │ watcher  │  │
//!                    │                └──────────┘     └──────────┘  │
//!                    │                                                │
//!                    │  config · observability · lifecycle            │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use linkboard::config::{load_config, AppConfig, SeedWatcher};
use linkboard::ident::HashidCodec;
use linkboard::lifecycle::Shutdown;
use linkboard::observability::{logging, metrics};
use linkboard::store::{load_seed, MemoryDirectory};
use linkboard::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("linkboard.toml"));

    let config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        AppConfig::default()
    };

    logging::init(&config.observability.log_level);
    tracing::info!("linkboard v0.1.0 starting");
    if !config_path.exists() {
        tracing::warn!(path = %config_path.display(), "Config file not found, using defaults");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        token_min_length = config.hashid.min_length,
        "Configuration loaded"
    );

    let codec = Arc::new(HashidCodec::new(&config.hashid)?);

    let directory = match &config.directory.seed_path {
        Some(path) => load_seed(std::path::Path::new(path))?,
        None => {
            tracing::warn!("No seed path configured, starting with an empty directory");
            MemoryDirectory::new()
        }
    };
    metrics::record_directory_size(directory.len());
    let directory = Arc::new(ArcSwap::from_pointee(directory));

    // The notify handle must stay alive for the watch to stay active.
    let mut _watcher_handle = None;
    let directory_updates = match (&config.directory.seed_path, config.directory.watch) {
        (Some(path), true) => {
            let (watcher, updates) = SeedWatcher::new(std::path::Path::new(path));
            _watcher_handle = Some(watcher.run()?);
            updates
        }
        _ => {
            let (_tx, updates) = mpsc::unbounded_channel();
            updates
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, codec, directory);
    server
        .run(listener, directory_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
