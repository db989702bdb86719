//! Seed loading for the in-memory directory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;

use crate::routing::{EntityKind, ResolutionStrategy};
use crate::store::{Entity, MemoryDirectory};

/// Errors that can occur while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entity record in the seed file.
#[derive(Debug, Deserialize)]
struct SeedEntity {
    kind: EntityKind,
    key: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    created_at: Option<u64>,
}

/// Load a directory from a JSON seed file.
///
/// Name-keyed entities without a name are accepted but can never be
/// resolved, so they are flagged at warn level. Missing timestamps
/// default to load time.
pub fn load_seed(path: &Path) -> Result<MemoryDirectory, SeedError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let records: Vec<SeedEntity> = serde_json::from_reader(reader)?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let directory = MemoryDirectory::new();
    for record in records {
        if record.name.is_none()
            && record.kind.strategy() == ResolutionStrategy::ByName
        {
            tracing::warn!(
                kind = %record.kind,
                key = record.key,
                "Seeded name-keyed entity has no name and will never resolve"
            );
        }
        directory.insert(Entity {
            kind: record.kind,
            key: record.key,
            name: record.name,
            created_at: record.created_at.unwrap_or(now),
        });
    }

    tracing::info!(path = %path.display(), entities = directory.len(), "Seed loaded");
    Ok(directory)
}
