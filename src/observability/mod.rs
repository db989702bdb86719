//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured key-value logging; request ID flows through all layers
//! - Metrics are cheap (atomic increments)
//! - Resolution outcomes are labeled by kind, never by raw segment
//!   (segments are attacker-controlled and unbounded)

pub mod logging;
pub mod metrics;
