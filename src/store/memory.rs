//! In-memory entity directory.

use dashmap::DashMap;

use crate::routing::EntityKind;
use crate::store::directory::EntityDirectory;
use crate::store::Entity;

/// Concurrent in-memory directory with a primary-key index and a
/// lowercase-folded name index.
///
/// Serves as the persistence collaborator for the bundled server and the
/// test suite. Snapshots are replaced wholesale on seed reload; inserts
/// after that point only happen in tests.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    by_key: DashMap<(EntityKind, u64), Entity>,
    by_name: DashMap<(EntityKind, String), u64>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, indexing it by key and, when named, by the
    /// lowercase fold of its name. A later insert with the same key
    /// replaces the earlier one.
    pub fn insert(&self, entity: Entity) {
        if let Some(name) = &entity.name {
            self.by_name
                .insert((entity.kind, name.to_lowercase()), entity.key);
        }
        self.by_key.insert((entity.kind, entity.key), entity);
    }

    /// Number of entities held.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl EntityDirectory for MemoryDirectory {
    fn find_by_name(&self, kind: EntityKind, name: &str) -> Option<Entity> {
        let key = *self.by_name.get(&(kind, name.to_lowercase()))?;
        self.find_by_key(kind, key)
    }

    fn find_by_key(&self, kind: EntityKind, key: u64) -> Option<Entity> {
        self.by_key.get(&(kind, key)).map(|r| r.value().clone())
    }
}
