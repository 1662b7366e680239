//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by method, status, route
//! - `site_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Without an installed exporter the macros are no-ops, so handlers and
//!   tests record unconditionally
//! - Unmatched requests are labelled `route="none"`

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("site_requests_total", "Requests dispatched by the route table");
    describe_histogram!(
        "site_request_duration_seconds",
        Unit::Seconds,
        "Time spent dispatching a request"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    let route = route.to_string();

    counter!(
        "site_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "route" => route.clone()
    )
    .increment(1);
    histogram!(
        "site_request_duration_seconds",
        "method" => method,
        "status" => status,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}
