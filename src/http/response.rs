//! Public JSON representation of resolved entities.
//!
//! The raw entity is an internal handle; what leaves the service is a
//! view keyed by the entity's public route key, never the bare primary
//! key.

use serde::{Deserialize, Serialize};

use crate::ident::HashidCodec;
use crate::store::Entity;

/// JSON body returned for a resolved entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: String,
    /// Public route key: display name or opaque token.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: u64,
    pub age_secs: u64,
}

impl EntityView {
    pub fn new(entity: &Entity, codec: &HashidCodec) -> Self {
        Self {
            kind: entity.kind.as_str().to_string(),
            id: entity.route_key(codec),
            name: entity.name.clone(),
            created_at: entity.created_at,
            age_secs: entity.age_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashidConfig;
    use crate::routing::EntityKind;

    #[test]
    fn test_view_never_exposes_the_raw_key() {
        let codec = HashidCodec::new(&HashidConfig::default()).unwrap();
        let entity = Entity {
            kind: EntityKind::Content,
            key: 42,
            name: None,
            created_at: 1_700_000_000,
        };

        let view = EntityView::new(&entity, &codec);
        assert_eq!(view.kind, "content");
        assert_eq!(view.id, codec.encode(42));
        assert_ne!(view.id, "42");

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("\"name\""));
    }
}
