//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build codec & directory → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C or broadcast signal → Stop accepting → Drain → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
