//! Prometheus metrics for search traffic and upstream health.
//!
//! Metrics are recorded through the `metrics` facade; without an installed
//! recorder every call is a no-op, so library code records unconditionally.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "overpass_request_latency_ms";
/// Facilities returned per search metric name.
pub const METRIC_RESULTS_PER_SEARCH: &str = "facility_results_per_search";
/// Searches served counter metric name.
pub const METRIC_SEARCHES: &str = "facility_searches_total";
/// Searches with no results counter metric name.
pub const METRIC_EMPTY_SEARCHES: &str = "facility_searches_empty_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "overpass_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Overpass request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_RESULTS_PER_SEARCH,
        "Number of facilities returned per search"
    );

    describe_counter!(METRIC_SEARCHES, "Total number of facility searches served");
    describe_counter!(
        METRIC_EMPTY_SEARCHES,
        "Total number of facility searches that found nothing"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of failed Overpass requests by kind"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and keep its histograms compact.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

/// Record one completed search and its result count.
pub fn record_search(result_count: usize) {
    counter!(METRIC_SEARCHES).increment(1);
    histogram!(METRIC_RESULTS_PER_SEARCH).record(result_count as f64);
    if result_count == 0 {
        counter!(METRIC_EMPTY_SEARCHES).increment(1);
    }
}

/// Increment upstream failures counter.
pub fn inc_upstream_failures(kind: &'static str) {
    counter!(METRIC_UPSTREAM_FAILURES, "kind" => kind).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}
