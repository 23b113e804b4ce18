use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| Arc::new(Metrics::new()));

/// Metrics collection for the Projects Server
pub struct Metrics {
    pub registry: Registry,

    // HTTP metrics
    pub http_requests: CounterVec,

    // Store metrics
    pub projects_stored: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests = CounterVec::new(
            Opts::new("projects_http_requests_total", "Total number of HTTP requests received"),
            &["method"],
        )
        .unwrap();
        registry.register(Box::new(http_requests.clone())).unwrap();

        let projects_stored =
            Gauge::new("projects_stored", "Number of projects currently held in memory").unwrap();
        registry.register(Box::new(projects_stored.clone())).unwrap();

        Self {
            registry,
            http_requests,
            projects_stored,
        }
    }

    /// Encode metrics to Prometheus text format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
