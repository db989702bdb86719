//! Route binding subsystem.
//!
//! # Data Flow
//! ```text
//! (EntityKind, raw path segment)
//!     → kind.rs (static strategy table: ByName | ByKey)
//!     → ByName: directory.find_by_name
//!     → ByKey:  codec.decode → first value → directory.find_by_key
//!     → Entity handle or ResolveError::NotFound
//! ```
//!
//! # Design Decisions
//! - Strategy is a compile-time property of the kind, never inferred
//!   from names or runtime inspection
//! - Undecodable tokens short-circuit; no lookup runs without a key
//! - One externally visible failure: NotFound. Malformed token, missing
//!   row, and missing name are indistinguishable to the caller
//! - The directory snapshot is an explicit argument, so a resolution is
//!   a pure function of (kind, segment, snapshot)

pub mod binder;
pub mod kind;

pub use binder::{ResolveError, RouteBinder};
pub use kind::{EntityKind, ResolutionStrategy};
