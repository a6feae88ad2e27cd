//! Metrics collection and exposition.
//!
//! # Metrics
//! - `client_builder_decorations_total` (counter): by `outcome`
//!   (`skipped`, `unmarked`, `decorated`, `missing_dependency`)
//! - `loadbalancer_requests_total` (counter): by `service`, `outcome`
//!   (`routed`, `no_instance`)

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_decoration(outcome: &'static str) {
    ::metrics::counter!("client_builder_decorations_total", "outcome" => outcome).increment(1);
}

pub fn record_balanced_request(service: &str, outcome: &'static str) {
    ::metrics::counter!(
        "loadbalancer_requests_total",
        "service" => service.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
