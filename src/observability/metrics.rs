//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay invocations by outcome (`ok`,
//!   `truncated`, or the error outcome)
//! - `relay_request_duration_seconds` (histogram): end-to-end latency by outcome
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed, so tests need no setup.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished relay invocation.
pub fn record_relay(outcome: &'static str, start: Instant) {
    metrics::counter!("relay_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("relay_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
