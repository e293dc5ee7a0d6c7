use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_int_counter, CounterVec, Encoder, IntCounter, TextEncoder,
};

lazy_static! {
    pub static ref ORDERS_CREATED: IntCounter = register_int_counter!(
        "orders_created_total",
        "Total number of orders successfully created"
    )
    .expect("metric cannot be created");

    // Observability hook for best-effort side effects: a publish or cache
    // failure increments here instead of failing the request.
    pub static ref EVENT_PUBLISH_FAILURES: IntCounter = register_int_counter!(
        "order_event_publish_failures_total",
        "New-order events that failed to publish after a committed write"
    )
    .expect("metric cannot be created");

    pub static ref CACHE_REQUESTS: CounterVec = register_counter_vec!(
        "order_cache_requests_total",
        "Order cache lookups by outcome",
        &["outcome"]
    )
    .expect("metric cannot be created");

    pub static ref JOBS_PROCESSED: IntCounter = register_int_counter!(
        "order_jobs_processed_total",
        "Deferred process-order jobs completed by the worker"
    )
    .expect("metric cannot be created");
}

pub fn record_cache_hit() {
    CACHE_REQUESTS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_REQUESTS.with_label_values(&["miss"]).inc();
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather() -> String {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
