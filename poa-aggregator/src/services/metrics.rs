use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Counter of lookups absorbed by the aggregation engine, labelled by `branch`.
pub const BRANCH_FAILURES_TOTAL: &str = "aggregation_branch_failures_total";

pub fn init_metrics() -> Result<(), BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    if METRICS_HANDLE.set(handle).is_err() {
        tracing::warn!("Metrics recorder already initialized");
    }

    describe_counter!(
        BRANCH_FAILURES_TOTAL,
        "Downstream lookups that failed and were left out of the aggregate"
    );
    describe_counter!("http_requests_total", "HTTP requests by route and status");

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}
