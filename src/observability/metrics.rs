//! Metrics collection and exposition.
//!
//! # Metrics
//! - `linkboard_resolutions_total` (counter): resolutions by kind, outcome
//! - `linkboard_request_duration_seconds` (histogram): handler latency
//! - `linkboard_requests_total` (counter): requests by method, status
//! - `linkboard_directory_entities` (gauge): entities in the active snapshot
//! - `linkboard_seed_reloads_total` (counter): applied snapshot swaps

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::EntityKind;

/// Install the Prometheus exporter on the given address.
///
/// Failure to install is logged, not fatal; the service runs without
/// metrics exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one segment resolution.
pub fn record_resolution(kind: EntityKind, outcome: &'static str) {
    counter!(
        "linkboard_resolutions_total",
        "kind" => kind.as_str(),
        "outcome" => outcome,
    )
    .increment(1);
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "linkboard_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!("linkboard_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the size of the active directory snapshot.
pub fn record_directory_size(entities: usize) {
    gauge!("linkboard_directory_entities").set(entities as f64);
}

/// Record an applied seed reload.
pub fn record_seed_reload() {
    counter!("linkboard_seed_reloads_total").increment(1);
}
