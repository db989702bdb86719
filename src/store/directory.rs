//! Lookup interface the binder depends on.

use crate::routing::EntityKind;
use crate::store::Entity;

/// Read-only lookup capabilities supplied by the persistence layer.
///
/// Both operations are synchronous and idempotent; whether they hit a
/// cache, an index, or a remote store is the implementor's concern.
/// Name-index case-sensitivity is likewise defined by the implementor.
pub trait EntityDirectory: Send + Sync {
    /// Find the entity of `kind` whose unique display name matches.
    fn find_by_name(&self, kind: EntityKind, name: &str) -> Option<Entity>;

    /// Find the entity of `kind` with the given primary key.
    fn find_by_key(&self, kind: EntityKind, key: u64) -> Option<Entity>;
}
