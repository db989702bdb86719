//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! At runtime:
//!     watcher.rs monitors the entity seed file
//!     → store::seed reloads on change
//!     → new MemoryDirectory shipped over a channel
//!     → server swaps the active snapshot atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changing it requires a restart
//! - All fields have defaults so a minimal (or absent) config works
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every error, not just the first
//! - The watcher covers the seed file, not the config file: re-salting
//!   the codec while serving would invalidate every public URL

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, DirectoryConfig, HashidConfig, ListenerConfig, ObservabilityConfig,
    TimeoutConfig,
};
pub use watcher::SeedWatcher;
