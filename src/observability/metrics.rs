//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_messages_total` (counter): inbound messages by pipeline outcome
//! - `gateway_rate_limiter_identifiers` (gauge): origins holding live windows
//! - `gateway_host_connections_total` (counter): host bridge connections opened
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op, so tests need no setup
//! - Prometheus exposition is opt-in via config

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one inbound message by its pipeline outcome label.
pub fn record_message(outcome: &'static str) {
    metrics::counter!("gateway_messages_total", "outcome" => outcome).increment(1);
}

/// Report how many identifiers the rate limiter is tracking.
pub fn record_tracked_identifiers(count: usize) {
    metrics::gauge!("gateway_rate_limiter_identifiers").set(count as f64);
}

/// Count an opened host bridge connection.
pub fn record_host_connection() {
    metrics::counter!("gateway_host_connections_total").increment(1);
}
