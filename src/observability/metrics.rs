//! Metrics collection and exposition.
//!
//! # Metrics
//! - `reserved_names_computations_total` (counter): computations by outcome
//! - `reserved_names_computation_seconds` (histogram): computation latency
//! - `reserved_names_set_size` (gauge): size of the last computed set
//! - `reserved_names_checks_total` (counter): name checks by outcome
//! - `reserved_names_http_requests_total` (counter): API requests by endpoint, status

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter started");
    Ok(())
}

pub fn record_computation(success: bool, size: usize, start: Instant) {
    let outcome = if success { "ok" } else { "error" };
    counter!("reserved_names_computations_total", "outcome" => outcome).increment(1);
    histogram!("reserved_names_computation_seconds").record(start.elapsed().as_secs_f64());
    if success {
        gauge!("reserved_names_set_size").set(size as f64);
    }
}

pub fn record_name_check(outcome: &'static str) {
    counter!("reserved_names_checks_total", "outcome" => outcome).increment(1);
}

pub fn record_request(endpoint: &'static str, status: u16) {
    counter!(
        "reserved_names_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
