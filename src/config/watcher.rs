//! Entity seed file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::store::{load_seed, MemoryDirectory};

/// Monitors the entity seed file and ships freshly loaded directories to
/// the server, which swaps them in atomically.
pub struct SeedWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<MemoryDirectory>,
}

impl SeedWatcher {
    /// Create a new SeedWatcher.
    ///
    /// Returns the watcher and a receiver for directory updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<MemoryDirectory>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher handle must be kept alive for the watch to
    /// stay active. A reload that fails keeps the current directory.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Seed file change detected, reloading...");
                        match load_seed(&path) {
                            Ok(directory) => {
                                let _ = tx.send(directory);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload seed: {}. Keeping current directory.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Seed watcher started");
        Ok(watcher)
    }
}
