//! Persisted records exposed through public URLs.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::ident::HashidCodec;
use crate::routing::{EntityKind, ResolutionStrategy};

/// A persisted record reachable through a public URL.
///
/// Owned and mutated by the persistence layer; this core only resolves
/// references to it. The primary key is assigned at creation and never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub key: u64,
    /// Unique display name; meaningful for name-keyed kinds.
    pub name: Option<String>,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}

impl Entity {
    /// The segment under which this entity is publicly addressed: the
    /// display name for name-keyed kinds, the encoded token otherwise.
    pub fn route_key(&self, codec: &HashidCodec) -> String {
        match self.kind.strategy() {
            ResolutionStrategy::ByName => self
                .name
                .clone()
                .unwrap_or_else(|| codec.encode(self.key)),
            ResolutionStrategy::ByKey => codec.encode(self.key),
        }
    }

    /// Seconds elapsed since creation.
    pub fn age_secs(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now.saturating_sub(self.created_at)
    }
}
