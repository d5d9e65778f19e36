//! Metrics collection and exposition.
//!
//! # Metrics
//! - `drinks_requests_total` (counter): requests by method, route, status
//! - `drinks_request_duration_seconds` (histogram): latency by method, route
//! - `drinks_rate_limited_total` (counter): 429s by limiter
//! - `drinks_auth_failures_total` (counter): 401s from authentication by reason
//! - `drinks_mutations_total` (counter): mock create/update/delete by operation
//! - `drinks_rate_limit_keys` (gauge): tracked keys per limiter after a sweep
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "drinks_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "drinks_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited(limiter: &'static str) {
    counter!("drinks_rate_limited_total", "limiter" => limiter).increment(1);
}

pub fn record_auth_failure(reason: &'static str) {
    counter!("drinks_auth_failures_total", "reason" => reason).increment(1);
}

pub fn record_mutation(operation: &'static str) {
    counter!("drinks_mutations_total", "operation" => operation).increment(1);
}

pub fn record_rate_limit_keys(limiter: &'static str, keys: usize) {
    gauge!("drinks_rate_limit_keys", "limiter" => limiter).set(keys as f64);
}
