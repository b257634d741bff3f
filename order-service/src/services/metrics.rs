//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and records the order domain counters.
//! Until `init_metrics` runs the `metrics` facade is a no-op, which is what
//! tests rely on.

use crate::models::OrderStatus;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup before any metric
/// is recorded.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))?;

    Ok(())
}

/// Current metrics in Prometheus text format, for the /metrics endpoint.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_order_placed(item_count: usize, total_amount: f64) {
    counter!("orders_placed_total").increment(1);
    counter!("order_line_items_total").increment(item_count as u64);
    // Whole currency units; fractional amounts are dropped
    if total_amount.is_finite() && total_amount > 0.0 {
        counter!("order_value_total").increment(total_amount as u64);
    }
}

pub fn record_status_update(status: OrderStatus) {
    counter!("order_status_updates_total", "status" => status.as_str()).increment(1);
}

pub fn record_seller_stats_request() {
    counter!("seller_stats_requests_total").increment(1);
}
