//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use linkboard::config::AppConfig;
use linkboard::ident::HashidCodec;
use linkboard::lifecycle::Shutdown;
use linkboard::routing::EntityKind;
use linkboard::store::{Entity, MemoryDirectory};
use linkboard::HttpServer;

/// A running server plus the handles tests use to drive it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    /// Push replacement directory snapshots, as the seed watcher would.
    #[allow(dead_code)]
    pub updates: mpsc::UnboundedSender<MemoryDirectory>,
}

/// Config with a fixed test salt so tokens are reproducible per test.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.hashid.salt = "integration test salt".to_string();
    config
}

/// Codec matching `test_config`, for minting tokens in assertions.
#[allow(dead_code)]
pub fn test_codec() -> HashidCodec {
    HashidCodec::new(&test_config().hashid).unwrap()
}

#[allow(dead_code)]
pub fn entity(kind: EntityKind, key: u64, name: Option<&str>) -> Entity {
    Entity {
        kind,
        key,
        name: name.map(str::to_string),
        created_at: 1_700_000_000,
    }
}

/// Boot the real server on an ephemeral port with the given snapshot
/// and an externally supplied update channel.
pub async fn spawn_server(
    config: AppConfig,
    directory: MemoryDirectory,
    updates: mpsc::UnboundedReceiver<MemoryDirectory>,
) -> (SocketAddr, Shutdown) {
    let codec = Arc::new(HashidCodec::new(&config.hashid).unwrap());
    let directory = Arc::new(ArcSwap::from_pointee(directory));
    let server = HttpServer::new(&config, codec, directory);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, updates, signal).await;
    });

    (addr, shutdown)
}

/// `spawn_server` with a test-owned update channel.
#[allow(dead_code)]
pub async fn start_server(config: AppConfig, directory: MemoryDirectory) -> TestServer {
    let (tx, rx) = mpsc::unbounded_channel();
    let (addr, shutdown) = spawn_server(config, directory, rx).await;
    TestServer {
        addr,
        shutdown,
        updates: tx,
    }
}
