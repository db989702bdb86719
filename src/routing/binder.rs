//! Segment resolution against a directory snapshot.

use std::sync::Arc;

use thiserror::Error;

use crate::ident::HashidCodec;
use crate::routing::kind::{EntityKind, ResolutionStrategy};
use crate::store::{Entity, EntityDirectory};

/// The single failure a resolution can surface.
///
/// Malformed tokens, well-formed tokens with no matching record, and
/// unknown names all collapse into this variant so callers cannot tell
/// which case occurred.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no matching {0} for the requested segment")]
    NotFound(EntityKind),
}

/// Resolves raw path segments into entity handles.
///
/// Stateless apart from the immutable codec; one instance serves every
/// concurrent request.
#[derive(Debug, Clone)]
pub struct RouteBinder {
    codec: Arc<HashidCodec>,
}

impl RouteBinder {
    pub fn new(codec: Arc<HashidCodec>) -> Self {
        Self { codec }
    }

    /// Resolve `segment` as a reference to an entity of `kind` within
    /// the given directory snapshot.
    ///
    /// Name-keyed kinds look the segment up as a unique display name.
    /// Id-keyed kinds decode the segment first; if nothing decodes, the
    /// resolution fails without touching the directory. Tokens are
    /// single-value in this system, so only the first decoded value is
    /// consulted.
    pub fn resolve(
        &self,
        directory: &dyn EntityDirectory,
        kind: EntityKind,
        segment: &str,
    ) -> Result<Entity, ResolveError> {
        match kind.strategy() {
            ResolutionStrategy::ByName => directory
                .find_by_name(kind, segment)
                .ok_or(ResolveError::NotFound(kind)),
            ResolutionStrategy::ByKey => {
                let key = self
                    .codec
                    .decode(segment)
                    .first()
                    .copied()
                    .ok_or(ResolveError::NotFound(kind))?;
                directory
                    .find_by_key(kind, key)
                    .ok_or(ResolveError::NotFound(kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashidConfig;
    use crate::store::MemoryDirectory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn codec() -> Arc<HashidCodec> {
        Arc::new(HashidCodec::new(&HashidConfig::default()).unwrap())
    }

    fn entity(kind: EntityKind, key: u64, name: Option<&str>) -> Entity {
        Entity {
            kind,
            key,
            name: name.map(str::to_string),
            created_at: 1_700_000_000,
        }
    }

    /// Directory wrapper that counts key lookups.
    struct CountingDirectory {
        inner: MemoryDirectory,
        key_lookups: AtomicUsize,
    }

    impl EntityDirectory for CountingDirectory {
        fn find_by_name(&self, kind: EntityKind, name: &str) -> Option<Entity> {
            self.inner.find_by_name(kind, name)
        }

        fn find_by_key(&self, kind: EntityKind, key: u64) -> Option<Entity> {
            self.key_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_key(kind, key)
        }
    }

    #[test]
    fn test_name_keyed_hit() {
        let directory = MemoryDirectory::new();
        directory.insert(entity(EntityKind::Group, 1, Some("rustaceans")));

        let binder = RouteBinder::new(codec());
        let found = binder
            .resolve(&directory, EntityKind::Group, "rustaceans")
            .unwrap();
        assert_eq!(found.key, 1);
        assert_eq!(found.name.as_deref(), Some("rustaceans"));
    }

    #[test]
    fn test_name_keyed_miss() {
        let directory = MemoryDirectory::new();
        directory.insert(entity(EntityKind::Group, 1, Some("rustaceans")));

        let binder = RouteBinder::new(codec());
        let err = binder
            .resolve(&directory, EntityKind::Group, "missing")
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound(EntityKind::Group));
    }

    #[test]
    fn test_id_keyed_hit() {
        let codec = codec();
        let directory = MemoryDirectory::new();
        directory.insert(entity(EntityKind::Content, 42, None));

        let binder = RouteBinder::new(codec.clone());
        let token = codec.encode(42);
        let found = binder
            .resolve(&directory, EntityKind::Content, &token)
            .unwrap();
        assert_eq!(found.key, 42);
        assert_eq!(found.kind, EntityKind::Content);
    }

    #[test]
    fn test_id_keyed_missing_row() {
        let codec = codec();
        let directory = MemoryDirectory::new();

        let binder = RouteBinder::new(codec.clone());
        let token = codec.encode(42);
        let err = binder
            .resolve(&directory, EntityKind::Content, &token)
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound(EntityKind::Content));
    }

    #[test]
    fn test_undecodable_token_skips_lookup() {
        let directory = CountingDirectory {
            inner: MemoryDirectory::new(),
            key_lookups: AtomicUsize::new(0),
        };

        let binder = RouteBinder::new(codec());
        let err = binder
            .resolve(&directory, EntityKind::Content, "garbage!")
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound(EntityKind::Content));
        assert_eq!(directory.key_lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_kinds_do_not_cross_resolve() {
        let codec = codec();
        let directory = MemoryDirectory::new();
        directory.insert(entity(EntityKind::Content, 7, None));

        let binder = RouteBinder::new(codec.clone());
        let token = codec.encode(7);
        assert!(binder.resolve(&directory, EntityKind::Comment, &token).is_err());
        assert!(binder.resolve(&directory, EntityKind::Content, &token).is_ok());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let codec = codec();
        let directory = MemoryDirectory::new();
        directory.insert(entity(EntityKind::Content, 42, None));
        directory.insert(entity(EntityKind::User, 3, Some("ferris")));

        let binder = RouteBinder::new(codec.clone());
        let token = codec.encode(42);
        let first = binder.resolve(&directory, EntityKind::Content, &token);
        let second = binder.resolve(&directory, EntityKind::Content, &token);
        assert_eq!(first, second);

        let first = binder.resolve(&directory, EntityKind::User, "ferris");
        let second = binder.resolve(&directory, EntityKind::User, "ferris");
        assert_eq!(first, second);
    }
}
