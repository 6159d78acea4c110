//! Prometheus metrics for invoicing-admin.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// REST API request counter by resource, method and status.
pub static API_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoicing_admin_api_requests_total",
        "Total number of invoicing API requests",
        &["resource", "method", "status"]
    )
    .expect("Failed to register api_requests_total")
});

/// REST API request duration histogram by resource.
pub static API_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "invoicing_admin_api_request_duration_seconds",
        "Invoicing API request duration in seconds",
        &["resource"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register api_request_duration")
});

/// Line item edits by operation.
pub static LINE_ITEM_EDITS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoicing_admin_line_item_edits_total",
        "Total number of line item edits by operation",
        &["operation"] // add, update, remove
    )
    .expect("Failed to register line_item_edits_total")
});

/// Rejected edits for alerting.
pub static EDIT_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoicing_admin_edit_errors_total",
        "Total number of rejected line item edits by type",
        &["error_type"]
    )
    .expect("Failed to register edit_errors_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&API_REQUESTS_TOTAL);
    Lazy::force(&API_REQUEST_DURATION);
    Lazy::force(&LINE_ITEM_EDITS_TOTAL);
    Lazy::force(&EDIT_ERRORS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
