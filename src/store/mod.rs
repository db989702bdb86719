//! Entity storage collaborator.
//!
//! # Data Flow
//! ```text
//! seed file (JSON)
//!     → seed.rs (parse & sanity-check)
//!     → MemoryDirectory (concurrent key + name indexes)
//!     → shared as an atomically swappable snapshot
//!
//! Resolution path:
//!     binder → EntityDirectory::find_by_name / find_by_key
//! ```
//!
//! # Design Decisions
//! - The binder only ever sees the EntityDirectory trait; storage
//!   format, indexing, and caching stay on this side of the seam
//! - Lookups are synchronous, read-only, and idempotent
//! - The name index folds to lowercase; display casing is preserved on
//!   the entity itself

pub mod directory;
pub mod entity;
pub mod memory;
pub mod seed;

pub use directory::EntityDirectory;
pub use entity::Entity;
pub use memory::MemoryDirectory;
pub use seed::{load_seed, SeedError};
